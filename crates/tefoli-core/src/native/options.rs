//! Command-line option registration.

/// Where a host application collects the options of its extensions.
///
/// Values given for a registered option are handed back to the extension
/// through its `configure(option, value)` entry point.
pub trait OptionSink {
    /// Registers an option taking an argument, shown as `argument` in help.
    fn add(&mut self, group: &str, option: &str, description: &str, argument: &str);

    /// Registers a flag.
    fn add_flag(&mut self, group: &str, option: &str, description: &str);
}
