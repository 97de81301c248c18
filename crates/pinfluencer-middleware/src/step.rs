//! Step functions.
//!
//! A [`Step`] is one named, directly callable unit of a route sequence: a
//! hook or a controller method bound to its shared owner. Steps take the
//! request context by mutable reference and report expected failures by
//! short-circuiting the context. Returning an error is reserved for
//! unexpected failures, which the dispatcher turns into a 500.
//!
//! # Example
//!
//! ```
//! use pinfluencer_core::{ApiGatewayEvent, PinfluencerContext};
//! use pinfluencer_middleware::Step;
//!
//! let step = Step::new("mark", |ctx: &mut PinfluencerContext| {
//!     ctx.id = "marked".to_string();
//! });
//!
//! let mut ctx = PinfluencerContext::new(ApiGatewayEvent::new("GET /brands"));
//! step.call(&mut ctx).unwrap();
//! assert_eq!(ctx.id, "marked");
//! assert_eq!(step.name(), "mark");
//! ```

use std::fmt;
use std::sync::Arc;

use pinfluencer_core::{PinfluencerContext, PinfluencerResult};

/// A type-erased step function that can be shared between sequences.
pub type StepFn = Arc<dyn Fn(&mut PinfluencerContext) -> PinfluencerResult<()> + Send + Sync>;

/// Return types accepted from step functions.
pub trait StepOutcome {
    /// Converts the outcome into the pipeline's result type.
    fn into_result(self) -> PinfluencerResult<()>;
}

impl StepOutcome for () {
    fn into_result(self) -> PinfluencerResult<()> {
        Ok(())
    }
}

impl StepOutcome for PinfluencerResult<()> {
    fn into_result(self) -> PinfluencerResult<()> {
        self
    }
}

/// A named step function.
#[derive(Clone)]
pub struct Step {
    name: &'static str,
    func: StepFn,
}

impl Step {
    /// Creates a step from a function.
    pub fn new<F, R>(name: &'static str, func: F) -> Self
    where
        F: Fn(&mut PinfluencerContext) -> R + Send + Sync + 'static,
        R: StepOutcome,
    {
        Self {
            name,
            func: Arc::new(move |ctx: &mut PinfluencerContext| func(ctx).into_result()),
        }
    }

    /// Returns the name used in logs and in sequence comparisons.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the step against a context.
    pub fn call(&self, ctx: &mut PinfluencerContext) -> PinfluencerResult<()> {
        (self.func)(ctx)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Step").field(&self.name).finish()
    }
}

/// Steps compare by name; a built sequence is identified by its step names.
impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Step {}

/// Binds a method of a shared owner as a [`Step`] named `Type::method`.
///
/// The owner is an `Arc` and is cloned into the step. Generic methods take
/// their type arguments in turbofish position (`Hooks::map_enum::<E>`).
/// Extra arguments are evaluated on every call.
///
/// ```
/// use std::sync::Arc;
/// use pinfluencer_core::PinfluencerContext;
/// use pinfluencer_middleware::step;
///
/// struct Greeter;
///
/// impl Greeter {
///     fn greet(&self, ctx: &mut PinfluencerContext, name: &str) {
///         ctx.id = name.to_string();
///     }
/// }
///
/// let greeter = Arc::new(Greeter);
/// let step = step!(greeter, Greeter::greet, "ada");
/// assert_eq!(step.name(), "Greeter::greet");
/// ```
#[macro_export]
macro_rules! step {
    ($owner:expr, $ty:ident :: $method:ident $(::<$($gen:ty),+>)? $(, $arg:expr)* $(,)?) => {{
        let owner = ::std::sync::Arc::clone(&$owner);
        $crate::Step::new(
            concat!(stringify!($ty), "::", stringify!($method)),
            move |ctx: &mut ::pinfluencer_core::PinfluencerContext| {
                $ty::$method $(::<$($gen),+>)? (&owner, ctx $(, $arg)*)
            },
        )
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use pinfluencer_core::{ApiGatewayEvent, PinfluencerError};

    fn ctx() -> PinfluencerContext {
        PinfluencerContext::new(ApiGatewayEvent::new("GET /test"))
    }

    struct Counter {
        hits: std::sync::atomic::AtomicUsize,
    }

    impl Counter {
        fn hit(&self, _ctx: &mut PinfluencerContext) {
            self.hits.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }

        fn fail(&self, _ctx: &mut PinfluencerContext, message: &str) -> PinfluencerResult<()> {
            Err(PinfluencerError::internal(message))
        }
    }

    #[test]
    fn test_unit_step() {
        let step = Step::new("teapot", |ctx: &mut PinfluencerContext| {
            ctx.fail(StatusCode::IM_A_TEAPOT);
        });
        let mut ctx = ctx();
        assert!(step.call(&mut ctx).is_ok());
        assert!(ctx.short_circuit);
    }

    #[test]
    fn test_fallible_step() {
        let step = Step::new("boom", |_: &mut PinfluencerContext| -> PinfluencerResult<()> {
            Err(PinfluencerError::internal("boom"))
        });
        assert!(step.call(&mut ctx()).is_err());
    }

    #[test]
    fn test_macro_binds_shared_owner() {
        let counter = Arc::new(Counter {
            hits: std::sync::atomic::AtomicUsize::new(0),
        });
        let first = step!(counter, Counter::hit);
        let second = step!(counter, Counter::hit);

        first.call(&mut ctx()).unwrap();
        second.call(&mut ctx()).unwrap();

        assert_eq!(first.name(), "Counter::hit");
        assert_eq!(first, second);
        assert_eq!(counter.hits.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn test_macro_with_arguments() {
        let counter = Arc::new(Counter {
            hits: std::sync::atomic::AtomicUsize::new(0),
        });
        let step = step!(counter, Counter::fail, "nope");
        let err = step.call(&mut ctx()).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_macro_with_type_arguments() {
        struct Typed;

        impl Typed {
            fn write<T: Default + ToString>(&self, ctx: &mut PinfluencerContext) {
                ctx.id = T::default().to_string();
            }
        }

        let typed = Arc::new(Typed);
        let step = step!(typed, Typed::write::<u8>);
        let mut ctx = ctx();
        step.call(&mut ctx).unwrap();

        assert_eq!(step.name(), "Typed::write");
        assert_eq!(ctx.id, "0");
    }

    #[test]
    fn test_debug_shows_name() {
        let step = Step::new("named", |_: &mut PinfluencerContext| {});
        assert_eq!(format!("{step:?}"), "Step(\"named\")");
    }
}
