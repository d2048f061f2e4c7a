use super::run_piped;
use crate::error::Result;
use std::time::Duration;

const SYMPY_TIMEOUT: Duration = Duration::from_secs(12);

const HARNESS: &str = r#"
import sys
from sympy import sympify, simplify

expr = sys.stdin.read()
print(simplify(sympify(expr)))
"#;

/// Evaluates `expression` symbolically via a short `python3 -c` script that
/// imports `sympy`.
pub async fn run_sympy(expression: &str) -> Result<String> {
    run_piped("python3", &["-c", HARNESS], expression, SYMPY_TIMEOUT).await
}
