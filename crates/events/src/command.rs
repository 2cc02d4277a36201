/// A user intent addressed to an aggregate.
///
/// Commands are transient: they are either turned into events or rejected with
/// a domain error. They are never recorded.
pub trait Command: Clone + core::fmt::Debug + 'static {
    /// Stable command name used in logs (e.g. "quote.select_product").
    fn command_type(&self) -> &'static str;
}
