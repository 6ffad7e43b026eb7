/// Receives events from a running simulation and optionally returns an action.
///
/// The unit type `()` observes nothing and never acts, and any closure of the
/// form `FnMut(&E) -> Option<A>` can be passed where an observer is expected:
///
/// ```ignore
/// let solution = braking::run(&physics, &mut controller, v0, &config, |event: &Event| {
///     (event.step >= 100).then_some(Action::StopEarly)
/// })?;
/// ```
pub trait Observer<E, A> {
    /// Observes an event, returning an action for the simulation to apply.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}
