//! Ordered fallback strategies.
//!
//! Some inputs can be read several ways and the first reading that works
//! wins. A [`Strategy`] is one such reading; [`first_success`] tries a list
//! of them in order. `Ok(None)` means "not this one, try the next", while an
//! `Err` aborts the whole chain.

use crate::error::Result;

pub struct Strategy<S: ?Sized, A, T> {
    pub name: &'static str,
    pub run: fn(&mut S, A) -> Result<Option<T>>,
}

impl<S: ?Sized, A, T> Strategy<S, A, T> {
    pub const fn new(name: &'static str, run: fn(&mut S, A) -> Result<Option<T>>) -> Self {
        Strategy { name, run }
    }
}

pub fn first_success<S: ?Sized, A: Copy, T>(
    state: &mut S,
    input: A,
    strategies: &[Strategy<S, A, T>],
) -> Result<Option<T>> {
    for strategy in strategies {
        if let Some(value) = (strategy.run)(state, input)? {
            log::trace!("'{}' strategy succeeded", strategy.name);
            return Ok(Some(value));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReconstructError;

    #[derive(Default)]
    struct Trace(Vec<&'static str>);

    fn never(trace: &mut Trace, _: u32) -> Result<Option<u32>> {
        trace.0.push("never");
        Ok(None)
    }

    fn even(trace: &mut Trace, n: u32) -> Result<Option<u32>> {
        trace.0.push("even");
        Ok((n % 2 == 0).then_some(n / 2))
    }

    fn always(trace: &mut Trace, n: u32) -> Result<Option<u32>> {
        trace.0.push("always");
        Ok(Some(n))
    }

    fn broken(trace: &mut Trace, _: u32) -> Result<Option<u32>> {
        trace.0.push("broken");
        Err(ReconstructError::CanonicalAlreadySet)
    }

    #[test]
    fn stops_at_first_success() {
        let strategies = [
            Strategy::new("never", never),
            Strategy::new("even", even),
            Strategy::new("always", always),
        ];
        let mut trace = Trace::default();
        assert_eq!(first_success(&mut trace, 4, &strategies).unwrap(), Some(2));
        assert_eq!(trace.0, ["never", "even"]);

        let mut trace = Trace::default();
        assert_eq!(first_success(&mut trace, 3, &strategies).unwrap(), Some(3));
        assert_eq!(trace.0, ["never", "even", "always"]);
    }

    #[test]
    fn all_failing_is_none() {
        let strategies = [Strategy::new("never", never)];
        let mut trace = Trace::default();
        assert_eq!(first_success(&mut trace, 1, &strategies).unwrap(), None);
    }

    #[test]
    fn error_short_circuits() {
        let strategies = [Strategy::new("broken", broken), Strategy::new("always", always)];
        let mut trace = Trace::default();
        assert!(first_success(&mut trace, 1, &strategies).is_err());
        assert_eq!(trace.0, ["broken"]);
    }
}
