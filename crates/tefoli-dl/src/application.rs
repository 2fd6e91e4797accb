//! Host application entry points.
//!
//! A solver host drives an [`ApplicationDl`] the way it drives any
//! application: it asks for the program name and version, lets it register
//! and validate command-line options, then calls [`ApplicationDl::main`] with
//! a native controller and the input files.

use std::fmt;
use std::sync::Arc;

use tefoli_config::ApplicationConfig;
use tefoli_core::{
    Control, DelegateError, OptionSink, Part, SolveControl, SolveMode, Theory, TheoryHandle,
};
use tracing::info;

use crate::{ControlDl, SolveCallbacksDl};

/// A custom main routine run instead of the default ground-and-solve.
pub type MainHook<C, T> = Box<
    dyn for<'c> Fn(&mut ControlDl<'c, C, T>) -> Result<(), <C as Control>::Error> + Send + Sync,
>;

/// An application that runs every controller it receives with the
/// difference logic theory.
///
/// One theory instance serves all controllers of the application.
pub struct ApplicationDl<C: SolveControl, T> {
    config: ApplicationConfig,
    theory: TheoryHandle<T>,
    main: Option<MainHook<C, T>>,
}

impl<C, T> ApplicationDl<C, T>
where
    C: SolveControl + 'static,
    T: Theory<C> + 'static,
    C::Error: From<DelegateError>,
{
    /// Creates an application named `name` with the default configuration.
    pub fn new(name: impl Into<String>) -> Result<Self, C::Error> {
        Self::from_config(ApplicationConfig::new().with_program_name(name))
    }

    /// Creates an application and loads its theory.
    ///
    /// Tunables in `config.theory` are applied right away; further values
    /// arrive through [`ApplicationDl::configure`] during option parsing.
    pub fn from_config(config: ApplicationConfig) -> Result<Self, C::Error> {
        let theory = T::load(&config.theory)?;
        for (key, value) in config.theory.tunables() {
            theory.configure(&key, &value)?;
        }
        info!(
            program = %config.program_name,
            version = %config.version,
            theory = %config.theory.name,
            "application created"
        );
        Ok(Self {
            config,
            theory: Arc::new(theory),
            main: None,
        })
    }

    /// Runs `main` on the wrapped controller instead of grounding and solving.
    pub fn with_main<F>(mut self, main: F) -> Self
    where
        F: for<'c> Fn(&mut ControlDl<'c, C, T>) -> Result<(), C::Error> + Send + Sync + 'static,
    {
        self.main = Some(Box::new(main));
        self
    }

    pub fn program_name(&self) -> &str {
        &self.config.program_name
    }

    pub fn version(&self) -> &str {
        &self.config.version
    }

    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// Returns the theory shared by every controller of this application.
    pub fn theory(&self) -> &TheoryHandle<T> {
        &self.theory
    }

    /// Hands an option value to the theory.
    pub fn configure(&self, option: &str, value: &str) -> Result<(), C::Error> {
        self.theory.configure(option, value)
    }

    /// Registers the theory's options with the host.
    pub fn register_options(&self, options: &mut dyn OptionSink) -> Result<(), C::Error> {
        self.theory.register_options(options)
    }

    /// Validates the option values.
    ///
    /// A rejected value surfaces as the theory's error.
    pub fn validate_options(&self) -> Result<(), C::Error> {
        self.theory.validate_options()
    }

    /// Runs the application on a controller owned by the host.
    ///
    /// Loads every file (standard input, `-`, when none are given), then runs
    /// the custom main routine if one is installed, otherwise grounds the
    /// configured default parts and solves.
    pub fn main(&self, control: &mut C, files: &[String]) -> Result<(), C::Error> {
        let mut control = ControlDl::builder()
            .adopt(control)
            .theory(Arc::clone(&self.theory))
            .build()?;

        let stdin = ["-".to_string()];
        let files = if files.is_empty() { &stdin[..] } else { files };
        for file in files {
            info!(file = %file, "loading program");
            control.load(file)?;
        }

        if let Some(main) = &self.main {
            return main(&mut control);
        }

        let parts: Vec<Part> = self
            .config
            .default_parts
            .iter()
            .map(|name| Part::new(name.clone(), Vec::new()))
            .collect();
        control.ground(&parts)?;
        let outcome = control.solve(&[], SolveCallbacksDl::new(), SolveMode::BLOCKING)?;
        if let Some(result) = outcome.result() {
            info!(%result, "search finished");
        }
        Ok(())
    }
}

impl<C: SolveControl, T> fmt::Debug for ApplicationDl<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationDl")
            .field("program_name", &self.config.program_name)
            .field("version", &self.config.version)
            .field("main", &self.main.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "application_tests.rs"]
mod tests;
