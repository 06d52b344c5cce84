//! Library of named functions callable from expressions.

use log::debug;

use core::{f64::consts::PI, fmt, slice};

use crate::error::ErrorKind;

type FnResult = Result<f64, ErrorKind>;

/// Computation performed by a [`Function`]. The variant determines the function arity.
#[derive(Clone, Copy)]
enum Body {
    Unary(fn(f64) -> FnResult),
    Binary(fn(f64, f64) -> FnResult),
    Quaternary(fn(f64, f64, f64, f64) -> FnResult),
}

/// Named function with a fixed number of arguments.
#[derive(Clone, Copy)]
pub struct Function {
    name: &'static str,
    params: &'static str,
    summary: &'static str,
    body: Body,
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}({})", self.name, self.params)
    }
}

impl Function {
    const fn unary(name: &'static str, summary: &'static str, body: fn(f64) -> FnResult) -> Self {
        Self {
            name,
            params: "x",
            summary,
            body: Body::Unary(body),
        }
    }

    /// Returns the function name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of arguments the function takes.
    pub fn arity(&self) -> usize {
        match self.body {
            Body::Unary(_) => 1,
            Body::Binary(_) => 2,
            Body::Quaternary(_) => 4,
        }
    }

    /// Returns a one-line description of the function.
    pub fn summary(&self) -> &'static str {
        self.summary
    }

    /// Calls the function on the provided args.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::ArgsLenMismatch`] if the number of `args` differs from the function arity.
    /// - [`ErrorKind::Domain`] if args are outside the function domain.
    pub fn call(&self, args: &[f64]) -> Result<f64, ErrorKind> {
        match (self.body, args) {
            (Body::Unary(body), &[x]) => body(x),
            (Body::Binary(body), &[x, y]) => body(x, y),
            (Body::Quaternary(body), &[x1, y1, x2, y2]) => body(x1, y1, x2, y2),
            _ => Err(ErrorKind::ArgsLenMismatch {
                function: self.name,
                def: self.arity(),
                call: args.len(),
            }),
        }
    }
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

fn sqrt(x: f64) -> FnResult {
    if x < 0.0 {
        Err(ErrorKind::domain("sqrt", "argument must be non-negative"))
    } else {
        Ok(x.sqrt())
    }
}

fn pow(base: f64, exponent: f64) -> FnResult {
    if base < 0.0 && exponent > 0.0 && exponent < 1.0 {
        Err(ErrorKind::domain(
            "pow",
            "exponent must not be strictly between 0 and 1 for a negative base",
        ))
    } else {
        Ok(base.powf(exponent))
    }
}

#[allow(clippy::unnecessary_wraps)]
fn vlength(x1: f64, y1: f64, x2: f64, y2: f64) -> FnResult {
    Ok((x2 - x1).hypot(y2 - y1))
}

static FUNCTIONS: &[Function] = &[
    Function::unary("sin", "x in radians", |x| Ok(x.sin())),
    Function::unary("cos", "x in radians", |x| Ok(x.cos())),
    Function::unary("tan", "x in radians", |x| Ok(x.tan())),
    Function::unary("sind", "x in degrees", |x| Ok(to_radians(x).sin())),
    Function::unary("cosd", "x in degrees", |x| Ok(to_radians(x).cos())),
    Function::unary("tand", "x in degrees", |x| Ok(to_radians(x).tan())),
    Function::unary("arcsin", "returns radians", |x| Ok(x.asin())),
    Function::unary("arccos", "returns radians", |x| Ok(x.acos())),
    Function::unary("arctan", "returns radians", |x| Ok(x.atan())),
    Function::unary("arcsind", "returns degrees", |x| Ok(to_degrees(x.asin()))),
    Function::unary("arccosd", "returns degrees", |x| Ok(to_degrees(x.acos()))),
    Function::unary("arctand", "returns degrees", |x| Ok(to_degrees(x.atan()))),
    Function::unary("sqrt", "returns the square root of x if x >= 0", sqrt),
    Function {
        name: "pow",
        params: "x, r",
        summary: "returns x^r unless x < 0 and 0 < r < 1",
        body: Body::Binary(pow),
    },
    Function::unary("pi", "returns pi*x", |x| Ok(PI * x)),
    Function {
        name: "vlength",
        params: "x1, y1, x2, y2",
        summary: "returns the distance between points (x1, y1) and (x2, y2)",
        body: Body::Quaternary(vlength),
    },
];

/// Registry of all functions callable from expressions.
///
/// The registry is immutable and shared by the entire process; use [`Self::get()`] to access it.
#[derive(Debug)]
pub struct FunctionLibrary {
    functions: &'static [Function],
}

static LIBRARY: FunctionLibrary = FunctionLibrary {
    functions: FUNCTIONS,
};

impl FunctionLibrary {
    /// Returns the function library.
    pub fn get() -> &'static Self {
        &LIBRARY
    }

    /// Looks up a function by its name.
    pub fn function(&self, name: &str) -> Option<&'static Function> {
        self.functions.iter().find(|function| function.name == name)
    }

    /// Returns the arity of the function with the specified name, or `None` if there is
    /// no such function.
    pub fn arity_of(&self, name: &str) -> Option<usize> {
        self.function(name).map(Function::arity)
    }

    /// Applies the function with the specified name to `args`.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::UnknownFunction`] if there is no function with this name.
    /// - Errors returned by [`Function::call()`].
    pub fn apply(&self, name: &str, args: &[f64]) -> Result<f64, ErrorKind> {
        let function = self
            .function(name)
            .ok_or_else(|| ErrorKind::UnknownFunction(name.to_owned()))?;
        let output = function.call(args);
        match &output {
            Ok(value) => debug!("{name}{args:?} = {value}"),
            Err(err) => debug!("{name}{args:?} failed: {err}"),
        }
        output
    }

    /// Iterates over all functions in the library.
    pub fn iter(&self) -> slice::Iter<'static, Function> {
        self.functions.iter()
    }
}

impl IntoIterator for &FunctionLibrary {
    type Item = &'static Function;
    type IntoIter = slice::Iter<'static, Function>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "actual = {actual}, expected = {expected}"
        );
    }

    #[test]
    fn arities() {
        let library = FunctionLibrary::get();
        for name in [
            "sin", "cos", "tan", "sind", "cosd", "tand", "arcsin", "arccos", "arctan", "arcsind",
            "arccosd", "arctand", "sqrt", "pi",
        ] {
            assert_eq!(library.arity_of(name), Some(1), "{name}");
        }
        assert_eq!(library.arity_of("pow"), Some(2));
        assert_eq!(library.arity_of("vlength"), Some(4));
        assert_eq!(library.arity_of("foo"), None);
        assert_eq!(library.arity_of("Sin"), None);
        assert_eq!(library.iter().count(), 16);
    }

    #[test]
    fn function_values() {
        let library = FunctionLibrary::get();
        assert_close(library.apply("pi", &[1.0]).unwrap(), 4.0 * 1_f64.atan());
        assert_close(library.apply("sind", &[30.0]).unwrap(), 0.5);
        assert_close(library.apply("cosd", &[60.0]).unwrap(), 0.5);
        assert_close(library.apply("tand", &[45.0]).unwrap(), 1.0);
        assert_close(library.apply("arcsind", &[1.0]).unwrap(), 90.0);
        assert_close(library.apply("arccosd", &[0.0]).unwrap(), 90.0);
        assert_close(library.apply("arctand", &[1.0]).unwrap(), 45.0);
        assert_close(library.apply("arctan", &[1.0]).unwrap(), PI / 4.0);
        assert_close(library.apply("sqrt", &[16.0]).unwrap(), 4.0);
        assert_close(library.apply("pow", &[2.0, 10.0]).unwrap(), 1024.0);
        assert_close(library.apply("pow", &[-2.0, 2.0]).unwrap(), 4.0);
        assert_close(library.apply("vlength", &[0.0, 0.0, 3.0, 4.0]).unwrap(), 5.0);
    }

    #[test]
    fn domain_errors() {
        let library = FunctionLibrary::get();
        assert_matches!(
            library.apply("sqrt", &[-4.0]),
            Err(ErrorKind::Domain { function: "sqrt", .. })
        );
        assert_matches!(
            library.apply("pow", &[-2.0, 0.5]),
            Err(ErrorKind::Domain { function: "pow", .. })
        );
        // Only exponents strictly between 0 and 1 are rejected.
        assert!(library.apply("pow", &[-8.0, 1.0]).is_ok());
        assert!(library.apply("pow", &[-8.0, 0.0]).is_ok());
        assert!(library.apply("pow", &[-8.0, 1.5]).unwrap().is_nan());
        // Other functions accept args as given.
        assert!(library.apply("arcsin", &[2.0]).unwrap().is_nan());
    }

    #[test]
    fn call_errors() {
        let library = FunctionLibrary::get();
        assert_matches!(
            library.apply("foo", &[1.0]),
            Err(ErrorKind::UnknownFunction(name)) if name == "foo"
        );
        assert_matches!(
            library.apply("pow", &[1.0]),
            Err(ErrorKind::ArgsLenMismatch { function: "pow", def: 2, call: 1 })
        );
        assert_matches!(
            library.apply("sin", &[]),
            Err(ErrorKind::ArgsLenMismatch { def: 1, call: 0, .. })
        );
    }

    #[test]
    fn function_display() {
        let library = FunctionLibrary::get();
        assert_eq!(library.function("vlength").unwrap().to_string(), "vlength(x1, y1, x2, y2)");
        assert_eq!(library.function("sind").unwrap().to_string(), "sind(x)");
        let names: Vec<_> = library.iter().map(Function::name).collect();
        assert_eq!(names[..3], ["sin", "cos", "tan"]);
    }
}
