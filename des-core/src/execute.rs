/// A model that advances one event at a time.
pub trait Step {
    type Error;

    /// Processes the next event.
    ///
    /// Returns `Ok(true)` while the model can keep going and `Ok(false)` once
    /// it has reached its own end (for example the end-of-run event).
    fn step(&mut self) -> Result<bool, Self::Error>;
}

/// Simulation execution trait.
pub trait Execute<S: Step> {
    /// Executes the model until it finishes and returns the number of steps
    /// taken.
    fn execute(self, sim: &mut S) -> Result<u64, S::Error>;
}

/// Executor is used for simple execution of an entire model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executor {
    _private: (),
}

impl Executor {
    /// Runs until the model reports that it has finished.
    #[must_use]
    pub fn unbound() -> Self {
        Self { _private: () }
    }

    /// Registers a side effect that is called _after_ each step.
    #[must_use]
    pub fn side_effect<S, F>(self, func: F) -> ExecutorWithSideEffect<F>
    where
        S: Step,
        F: FnMut(&S),
    {
        ExecutorWithSideEffect { side_effect: func }
    }
}

impl<S: Step> Execute<S> for Executor {
    fn execute(self, sim: &mut S) -> Result<u64, S::Error> {
        run_with(sim, |_: &S| {})
    }
}

pub struct ExecutorWithSideEffect<F> {
    side_effect: F,
}

impl<S, F> Execute<S> for ExecutorWithSideEffect<F>
where
    S: Step,
    F: FnMut(&S),
{
    fn execute(self, sim: &mut S) -> Result<u64, S::Error> {
        run_with(sim, self.side_effect)
    }
}

fn run_with<S, F>(sim: &mut S, mut side_effect: F) -> Result<u64, S::Error>
where
    S: Step,
    F: FnMut(&S),
{
    let mut taken = 0u64;
    loop {
        let more = sim.step()?;
        taken += 1;
        side_effect(sim);
        if !more {
            return Ok(taken);
        }
    }
}
