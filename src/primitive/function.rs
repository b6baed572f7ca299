use std::fmt;

type Mapping = dyn Fn(&[f64], f64) -> (Vec<f64>, f64) + Send + Sync;

/// A caller-supplied primitive: maps `(time grid, offset)` to
/// `(contribution, next offset)`.
///
/// The contribution must have one sample per grid point.
pub struct UserFunction(Box<Mapping>);

impl UserFunction {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[f64], f64) -> (Vec<f64>, f64) + Send + Sync + 'static,
    {
        Self(Box::new(f))
    }

    pub fn call(&self, t: &[f64], offset: f64) -> (Vec<f64>, f64) {
        (self.0)(t, offset)
    }
}

impl fmt::Debug for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserFunction(..)")
    }
}
