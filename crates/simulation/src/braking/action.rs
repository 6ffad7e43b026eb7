/// Control actions an observer may return to a braking run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run early and return the solution so far.
    StopEarly,
}
