//! Adapter from plain synchronous transforms to the operation contract.

use crate::Done;
use crate::error::FlowError;
use crate::truthy::Truthy;

/// Wrap `transform` as an operation `(input, done)`.
///
/// A truthy `input` completes with `Ok(transform(input))`; a falsy one (None, empty, zero)
/// completes with [`FlowError::MissingInput`]. `done` fires before this returns. A panic in
/// `transform` is not caught.
///
/// ```
/// let square_all = flowkit::make_async(|xs: Vec<i64>| xs.iter().map(|x| x * x).collect::<Vec<_>>());
/// let squares = flowkit::wait(|cb| flowkit::map(vec![vec![2, 10], vec![30]], square_all, cb)).unwrap();
/// assert_eq!(squares, vec![vec![4, 100], vec![900]]);
/// ```
pub fn make_async<T, R, F>(transform: F) -> impl Fn(T, Done<R>) + Clone + Send + Sync + 'static
where
    T: Truthy,
    F: Fn(T) -> R + Clone + Send + Sync + 'static,
{
    move |input: T, done: Done<R>| {
        if input.is_truthy() {
            done.ok(transform(input));
        } else {
            done.fail(FlowError::MissingInput);
        }
    }
}
