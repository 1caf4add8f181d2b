/// A single configuration option: a named value together with the range it may take.
///
/// The bounds are carried alongside the value so a caller — the CLI in particular — can
/// validate a requested setting and report the permitted range without hardcoding it.
#[derive(Clone)]
pub struct ConfigOption<T> {
    /// The name the option is identified by, as used on the command line.
    pub name: &'static str,

    /// The least value the option accepts.
    pub min: T,

    /// The greatest value the option accepts.
    pub max: T,

    /// The current setting.
    pub value: T,
}

impl<T: Clone> ConfigOption<T> {
    /// The permitted range of the option, as a `(min, max)` pair.
    pub fn min_max(&self) -> (T, T) {
        (self.min.clone(), self.max.clone())
    }
}
