//! An option sink that remembers what was registered.

use tefoli_core::OptionSink;

/// One registered option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedOption {
    pub group: String,
    pub option: String,
    pub description: String,
    /// `None` for flags.
    pub argument: Option<String>,
}

/// Collects registered options in order.
#[derive(Debug, Default)]
pub struct RecordingOptions {
    options: Vec<RecordedOption>,
}

impl RecordingOptions {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the registered options.
    pub fn options(&self) -> &[RecordedOption] {
        &self.options
    }

    /// Returns true if `option` was registered in any group.
    pub fn contains(&self, option: &str) -> bool {
        self.options.iter().any(|o| o.option == option)
    }
}

impl OptionSink for RecordingOptions {
    fn add(&mut self, group: &str, option: &str, description: &str, argument: &str) {
        self.options.push(RecordedOption {
            group: group.to_string(),
            option: option.to_string(),
            description: description.to_string(),
            argument: Some(argument.to_string()),
        });
    }

    fn add_flag(&mut self, group: &str, option: &str, description: &str) {
        self.options.push(RecordedOption {
            group: group.to_string(),
            option: option.to_string(),
            description: description.to_string(),
            argument: None,
        });
    }
}
