//! Aggregate traits for the in-memory, event-sourced quote model.

/// Identity and version of an aggregate.
pub trait AggregateRoot {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Number of events applied since the aggregate was created.
    fn version(&self) -> u64;
}

/// Decide/evolve split for a command-driven aggregate.
///
/// `handle` looks at the current state and returns the events a command
/// produces, without touching state. `apply` folds one event into state.
/// Neither performs IO.
pub trait Aggregate: AggregateRoot {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Fold one event into state. Must bump `version()` by exactly one.
    fn apply(&mut self, event: &Self::Event);

    /// Events `command` would produce from the current state.
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// `(state, command) -> state`, consuming the old state.
    ///
    /// On error nothing is applied; callers that need the old state keep a
    /// clone.
    fn reduce(mut self, command: &Self::Command) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let events = self.handle(command)?;
        for event in &events {
            self.apply(event);
        }
        Ok(self)
    }
}
