//! # calculator
//!
//! Arithmetic exercises exposed as subcommands through tagcli:
//!
//! ```bash
//! calculate multiplesSum -divisors=[3,5] -max=10      # 23
//! calculate power -x=2 -y=10                          # 1024
//! calculate fibonacciRecursion -max=10
//! calculate fibonacciWithoutRecursion -firstNumber=0 -secondNumber=1 -max=10
//! ```

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value as Json;
use tagcli::dispatch::cast::cast_int;
use tagcli::{Arguments, Command, Exposed, Registration};

/// Largest `-max` accepted by `multiplesSum`.
pub const MULTIPLES_LIMIT: i64 = 10_000_000;

/// Most additions `power` will perform.
pub const ADDITION_LIMIT: i64 = 100_000_000;

/// Deepest series the recursive Fibonacci will build.
pub const RECURSION_LIMIT: i64 = 1_000;

/// Longest series the iterative Fibonacci will build.
pub const SERIES_LIMIT: i64 = 100_000;

const PROGRAM_DOC: &str = "
    /**
     * Calculator
     * @title   Calculator Assignment
     * @version v1.01
     * @usage   calculate <method> [options...]
     */";

const MULTIPLES_SUM_DOC: &str = "
    /**
     * The sum of all natural numbers below -max that are multiples of divisors
     *      ex calculate multiplesSum -divisors=[3,4] -max=1000
     *
     * @param list $divisors Array of natural numbers
     * @param int $max       The maximum number that a multiple cannot reach
     */";

const POWER_DOC: &str = "
    /**
     * The power of x to index y
     *      ex calculate power -x=2 -y=2
     *
     * @param int $x The base to use
     * @param int $y The exponent
     */";

const FIBONACCI_RECURSION_DOC: &str = "
    /**
     * Calculate and print -max numbers for fibonacci series. Use recursion.
     *      ex calculate fibonacciRecursion -firstNumber=0 -secondNumber=1 -max=10
     *
     * @param int $firstNumber  Start number
     * @param int $secondNumber Second number
     * @param int $max          Max numbers to print
     * @param list $series      fibonacci series
     */";

const FIBONACCI_ITERATIVE_DOC: &str = "
    /**
     * Calculate and print -max numbers for fibonacci series without recursion.
     *      ex calculate fibonacciWithoutRecursion -firstNumber=0 -secondNumber=1 -max=10
     *
     * @param int $firstNumber  Start number
     * @param int $secondNumber Second number
     * @param int $max          Max numbers to print
     */";

#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Command for Calculator {
    fn register() -> Registration<Self> {
        Registration::new(PROGRAM_DOC)
            .expose(
                Exposed::new("multiplesSum", MULTIPLES_SUM_DOC, cmd_multiples_sum)
                    .required("divisors")
                    .required("max"),
            )
            .expose(
                Exposed::new("power", POWER_DOC, cmd_power)
                    .required("x")
                    .required("y"),
            )
            .expose(
                Exposed::new(
                    "fibonacciRecursion",
                    FIBONACCI_RECURSION_DOC,
                    cmd_fibonacci_recursion,
                )
                .optional("firstNumber")
                .optional("secondNumber")
                .optional("max")
                .optional("series"),
            )
            .expose(
                Exposed::new(
                    "fibonacciWithoutRecursion",
                    FIBONACCI_ITERATIVE_DOC,
                    cmd_fibonacci_without_recursion,
                )
                .optional("firstNumber")
                .optional("secondNumber")
                .optional("max"),
            )
    }

    fn help_epilogue(&self) -> Option<String> {
        Some(self.assignment())
    }
}

// ============================================================================
// Handlers
// ============================================================================

fn cmd_multiples_sum(calc: &Calculator, args: &Arguments) -> Result<String> {
    let divisors = args
        .list("divisors")
        .ok_or_else(|| anyhow!("Parameter -divisors should be a list of natural numbers"))?;
    let divisors = list_to_ints(divisors, "divisors")?;
    let max = args.int("max").unwrap_or_default();
    Ok(calc.multiples_sum(&divisors, max)?.to_string())
}

fn cmd_power(calc: &Calculator, args: &Arguments) -> Result<String> {
    let x = args.int("x").unwrap_or_default();
    let y = args.int("y").unwrap_or_default();
    Ok(calc.power(x, y)?.to_string())
}

fn cmd_fibonacci_recursion(calc: &Calculator, args: &Arguments) -> Result<String> {
    let series = match args.list("series") {
        Some(items) => list_to_ints(items, "series")?,
        None => Vec::new(),
    };
    calc.fibonacci_recursion(
        args.int("firstNumber").unwrap_or(0),
        args.int("secondNumber").unwrap_or(1),
        args.int("max").unwrap_or(10),
        series,
    )
}

fn cmd_fibonacci_without_recursion(calc: &Calculator, args: &Arguments) -> Result<String> {
    calc.fibonacci_without_recursion(
        args.int("firstNumber").unwrap_or(1),
        args.int("secondNumber").unwrap_or(1),
        args.int("max").unwrap_or(10),
    )
}

/// JSON list items as integers: numbers truncate, numeric strings are read
/// like any other int option, booleans count as 0/1.
fn list_to_ints(items: &[Json], name: &str) -> Result<Vec<i64>> {
    items
        .iter()
        .map(|item| match item {
            Json::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .ok_or_else(|| anyhow!("Numbers in -{name} should be integers")),
            Json::String(s) => Ok(cast_int(s)),
            Json::Bool(b) => Ok(i64::from(*b)),
            Json::Null => Ok(0),
            _ => bail!("Parameter -{name} should be a flat list of numbers"),
        })
        .collect()
}

// ============================================================================
// Operations
// ============================================================================

impl Calculator {
    /// Sum of all natural numbers below `max` that are multiples of at least
    /// one divisor.
    pub fn multiples_sum(&self, divisors: &[i64], max: i64) -> Result<i64> {
        if max <= 1 {
            bail!("Parameter -max should be greater than 1");
        }
        if max > MULTIPLES_LIMIT {
            bail!("Parameter -max should not exceed {MULTIPLES_LIMIT}");
        }
        if divisors.iter().any(|&d| d < 1 || d >= max) {
            bail!("Numbers in -divisors should be between 1 and {}", max - 1);
        }

        let mut sum: i64 = 0;
        for i in 0..max {
            if divisors.iter().any(|&d| i % d == 0) {
                sum = sum
                    .checked_add(i)
                    .context("Sum of multiples does not fit in a 64-bit integer")?;
            }
        }
        Ok(sum)
    }

    /// `x` to the power `y` by repeated addition.
    pub fn power(&self, x: i64, y: i64) -> Result<i64> {
        if x < 0 || y < 0 {
            bail!("Parameters -x -y should be natural numbers");
        }
        if y == 0 {
            return Ok(1);
        }
        if x <= 1 {
            return Ok(x);
        }
        if (x - 1).saturating_mul(y - 1) > ADDITION_LIMIT {
            bail!("Parameters -x -y need more than {ADDITION_LIMIT} additions");
        }

        let mut power = x;
        let mut increment = x;
        for _ in 1..y {
            for _ in 1..x {
                power = power
                    .checked_add(increment)
                    .context("Result of -x^-y does not fit in a 64-bit integer")?;
            }
            increment = power;
        }
        Ok(power)
    }

    /// Fibonacci series of `max` numbers, built recursively. A non-empty
    /// `series` is continued instead of seeded with the two start numbers.
    pub fn fibonacci_recursion(
        &self,
        first: i64,
        second: i64,
        max: i64,
        mut series: Vec<i64>,
    ) -> Result<String> {
        if !(2..=RECURSION_LIMIT).contains(&max) {
            bail!("Parameter -max should be between 2 and {RECURSION_LIMIT}");
        }
        if series.is_empty() {
            series.extend([first, second]);
        }
        let series = grow_series(first, second, max, series)?;
        describe_series(&series)
    }

    /// Fibonacci series of `max` numbers (at least the two start numbers),
    /// built iteratively.
    pub fn fibonacci_without_recursion(&self, first: i64, second: i64, max: i64) -> Result<String> {
        if max > SERIES_LIMIT {
            bail!("Parameter -max should not exceed {SERIES_LIMIT}");
        }
        let mut series = vec![first, second];
        for i in 2..max.max(2) as usize {
            let next = series[i - 2]
                .checked_add(series[i - 1])
                .context("Fibonacci number does not fit in a 64-bit integer")?;
            series.push(next);
        }
        describe_series(&series)
    }

    /// Walkthrough of the exercises with live results, shown under help.
    pub fn assignment(&self) -> String {
        fn shown<T: ToString>(result: Result<T>) -> String {
            match result {
                Ok(value) => value.to_string(),
                Err(err) => format!("error: {err}"),
            }
        }

        let steps = [
            (
                "A: The sum of all natural numbers below 10 that are multiples of 3 or 5 are 23 (3 + 5 + 6 + 9):",
                "calculate multiplesSum -divisors=[3,5] -max=10",
                shown(self.multiples_sum(&[3, 5], 10)),
            ),
            (
                "A Extra: Create a second algorithm to find the sum of all the multiples of 3 or 5 below 1000:",
                "calculate multiplesSum -divisors=[3,5] -max=1000",
                shown(self.multiples_sum(&[3, 5], 1000)),
            ),
            (
                "A Extra: Create a second algorithm to find the sum of all the multiples of 3 or 4 below 1000:",
                "calculate multiplesSum -divisors=[3,4] -max=1000",
                shown(self.multiples_sum(&[3, 4], 1000)),
            ),
            (
                "B: Calculate x^y:",
                "calculate power -x=2 -y=2",
                shown(self.power(2, 2)),
            ),
            (
                "C: Fibonacci:",
                "calculate fibonacciRecursion -firstNumber=0 -secondNumber=1 -max=10",
                shown(self.fibonacci_recursion(0, 1, 10, Vec::new())),
            ),
            (
                "C Extra:",
                "calculate fibonacciWithoutRecursion -firstNumber=0 -secondNumber=1 -max=10",
                shown(self.fibonacci_without_recursion(0, 1, 10)),
            ),
        ];

        let mut text = String::from("Assignment:\n");
        let blocks: Vec<String> = steps
            .iter()
            .map(|(task, invocation, result)| format!("{task}\n{invocation}\nResult:{result}\n"))
            .collect();
        text.push_str(&blocks.join("\n"));
        text
    }
}

fn grow_series(first: i64, second: i64, max: i64, mut series: Vec<i64>) -> Result<Vec<i64>> {
    let max = max - 1;
    if max == 1 {
        return Ok(series);
    }
    let next = first
        .checked_add(second)
        .context("Fibonacci number does not fit in a 64-bit integer")?;
    series.push(next);
    grow_series(second, next, max, series)
}

fn describe_series(series: &[i64]) -> Result<String> {
    let sum = series
        .iter()
        .try_fold(0i64, |acc, &n| acc.checked_add(n))
        .context("Sum of the series does not fit in a 64-bit integer")?;
    Ok(format!(
        "found sum {sum} for {} numbers {}",
        series.len(),
        serde_json::to_string(series)?
    ))
}
