//! Budget scripts
//!
//! A script drives a [`BudgetStore`] one command per line. Blank lines and
//! `#` comments are skipped. Periods are written `YYYY-MM` with a 1-based
//! month, amounts are parsed leniently and category names are matched
//! case-insensitively.
//!
//! ```text
//! start 2024-01
//! end 2024-06
//! opening 1,000
//! add expense Office Rent
//! set 2024-01 $2,500 Office Rent
//! fill 2024-01 Office Rent
//! ```

use std::fmt;

use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{parse_numeric_value, Category, CategoryId, CategoryType, CellPosition, Period};
use crate::store::{BudgetStore, Direction, GridIntent};

/// One parsed script line
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Start(Period),
    End(Period),
    Opening(f64),
    Add {
        kind: CategoryType,
        name: String,
        is_parent: bool,
    },
    Sub(String),
    Delete(String),
    Set {
        period: Period,
        amount: f64,
        category: String,
    },
    Fill {
        period: Period,
        category: String,
    },
    Focus {
        period: Period,
        category: String,
    },
    Unfocus,
    Move(Direction),
    Intent(GridIntent),
}

/// `YYYY-MM` with a 1-based month, as scripts write it
fn script_period(period: &Period) -> String {
    format!("{}-{:02}", period.year(), period.month() + 1)
}

fn intent_keyword(intent: &GridIntent) -> String {
    match intent {
        GridIntent::Move(direction) => format!("move {}", direction),
        GridIntent::AddSubcategory => "intent add-sub".to_string(),
        GridIntent::ApplyToAllMonths => "intent apply-all".to_string(),
        GridIntent::DeleteCategory => "intent delete".to_string(),
    }
}

/// Prints the command back in script syntax
impl fmt::Display for ScriptCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start(p) => write!(f, "start {}", script_period(p)),
            Self::End(p) => write!(f, "end {}", script_period(p)),
            Self::Opening(v) => write!(f, "opening {}", v),
            Self::Add {
                kind,
                name,
                is_parent,
            } => {
                let verb = if *is_parent { "add-parent" } else { "add" };
                write!(f, "{} {} {}", verb, kind, name)
            }
            Self::Sub(name) => write!(f, "sub {}", name),
            Self::Delete(name) => write!(f, "delete {}", name),
            Self::Set {
                period,
                amount,
                category,
            } => write!(f, "set {} {} {}", script_period(period), amount, category),
            Self::Fill { period, category } => {
                write!(f, "fill {} {}", script_period(period), category)
            }
            Self::Focus { period, category } => {
                write!(f, "focus {} {}", script_period(period), category)
            }
            Self::Unfocus => write!(f, "unfocus"),
            Self::Move(direction) => write!(f, "move {}", direction),
            Self::Intent(intent) => write!(f, "{}", intent_keyword(intent)),
        }
    }
}

/// Result of running a whole script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptSummary {
    /// Commands executed
    pub commands: usize,
    /// Store version after the last command
    pub version: u64,
}

fn parse_period(token: Option<&str>) -> Result<Period, String> {
    let token = token.ok_or("missing period (expected YYYY-MM)")?;
    token.parse::<Period>().map_err(|e| e.to_string())
}

fn parse_kind(token: Option<&str>) -> Result<CategoryType, String> {
    match token.map(str::to_lowercase).as_deref() {
        Some("income") => Ok(CategoryType::Income),
        Some("expense") | Some("expenses") => Ok(CategoryType::Expense),
        Some(other) => Err(format!("unknown category type '{}' (expected income or expense)", other)),
        None => Err("missing category type (expected income or expense)".to_string()),
    }
}

fn parse_intent(token: Option<&str>) -> Result<GridIntent, String> {
    match token.map(str::to_lowercase).as_deref() {
        Some("add-sub") => Ok(GridIntent::AddSubcategory),
        Some("apply-all") => Ok(GridIntent::ApplyToAllMonths),
        Some("delete") => Ok(GridIntent::DeleteCategory),
        Some(other) => Err(format!("unknown intent '{}'", other)),
        None => Err("missing intent (expected add-sub, apply-all or delete)".to_string()),
    }
}

/// Join the remaining words into a category name
fn name<'a>(words: impl Iterator<Item = &'a str>) -> Result<String, String> {
    let name = words.collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        Err("missing category name".to_string())
    } else {
        Ok(name)
    }
}

fn parse_command(line: &str) -> Result<Option<ScriptCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };

    let command = match keyword.to_lowercase().as_str() {
        "start" => ScriptCommand::Start(parse_period(words.next())?),
        "end" => ScriptCommand::End(parse_period(words.next())?),
        "opening" => {
            let amount = words.next().ok_or("missing amount")?;
            ScriptCommand::Opening(parse_numeric_value(amount))
        }
        verb @ ("add" | "add-parent") => ScriptCommand::Add {
            kind: parse_kind(words.next())?,
            name: name(words.by_ref())?,
            is_parent: verb == "add-parent",
        },
        "sub" => ScriptCommand::Sub(name(words.by_ref())?),
        "delete" => ScriptCommand::Delete(name(words.by_ref())?),
        "set" => {
            let period = parse_period(words.next())?;
            let amount = words.next().ok_or("missing amount")?;
            ScriptCommand::Set {
                period,
                amount: parse_numeric_value(amount),
                category: name(words.by_ref())?,
            }
        }
        "fill" => ScriptCommand::Fill {
            period: parse_period(words.next())?,
            category: name(words.by_ref())?,
        },
        "focus" => ScriptCommand::Focus {
            period: parse_period(words.next())?,
            category: name(words.by_ref())?,
        },
        "unfocus" => ScriptCommand::Unfocus,
        "move" => {
            let direction = words.next().ok_or("missing direction")?;
            ScriptCommand::Move(direction.parse()?)
        }
        "intent" => ScriptCommand::Intent(parse_intent(words.next())?),
        other => return Err(format!("unknown command '{}'", other)),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected '{}' after {}", extra, keyword));
    }

    Ok(Some(command))
}

/// Parse a whole script into `(line number, command)` pairs
///
/// Line numbers are 1-based. The first malformed line aborts parsing.
pub fn parse_script(source: &str) -> BudgetResult<Vec<(usize, ScriptCommand)>> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line_no = index + 1;
            parse_command(line)
                .map_err(|message| BudgetError::script(line_no, message))
                .transpose()
                .map(|parsed| parsed.map(|command| (line_no, command)))
        })
        .collect()
}

fn resolve(store: &BudgetStore, name: &str) -> BudgetResult<CategoryId> {
    store
        .state()
        .find_category_by_name(name)
        .map(|c| c.id)
        .ok_or_else(|| BudgetError::category_not_found(name))
}

/// Apply one command to the store
pub fn execute(store: &mut BudgetStore, command: &ScriptCommand) -> BudgetResult<()> {
    debug!(%command, "execute");

    match command {
        ScriptCommand::Start(period) => store.set_start_period(*period),
        ScriptCommand::End(period) => {
            store.set_end_period(*period);
        }
        ScriptCommand::Opening(amount) => store.set_opening_balance(*amount),
        ScriptCommand::Add {
            kind,
            name,
            is_parent,
        } => {
            Category::validate_name(name).map_err(|e| BudgetError::Validation(e.to_string()))?;
            store.add_category(name.trim(), *kind, kind.default_parent(), *is_parent);
        }
        ScriptCommand::Sub(name) => {
            let id = resolve(store, name)?;
            store.add_subcategory(id);
        }
        ScriptCommand::Delete(name) => {
            let id = resolve(store, name)?;
            store.delete_category(id);
        }
        ScriptCommand::Set {
            period,
            amount,
            category,
        } => {
            let id = resolve(store, category)?;
            store.set_cell_value(id, *period, *amount);
        }
        ScriptCommand::Fill { period, category } => {
            let id = resolve(store, category)?;
            store.apply_to_all_months(id, *period);
        }
        ScriptCommand::Focus { period, category } => {
            let id = resolve(store, category)?;
            store.set_focused_cell(Some(CellPosition::new(id, *period)));
        }
        ScriptCommand::Unfocus => store.set_focused_cell(None),
        ScriptCommand::Move(direction) => {
            store.move_focus(*direction);
        }
        ScriptCommand::Intent(intent) => {
            store.dispatch(*intent);
        }
    }

    Ok(())
}

/// Parse and run a script; errors carry the failing line number
pub fn run_script(store: &mut BudgetStore, source: &str) -> BudgetResult<ScriptSummary> {
    let commands = parse_script(source)?;

    for (line, command) in &commands {
        execute(store, command).map_err(|e| e.at_line(*line))?;
    }

    Ok(ScriptSummary {
        commands: commands.len(),
        version: store.version(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let script = "\
# comment
start 2024-03

set 2024-03 $1,234.56 cloud hosting
add-parent income Consulting Retainers
move next
intent apply-all
";
        let commands = parse_script(script).unwrap();

        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0], (2, ScriptCommand::Start(Period::new(2, 2024))));
        assert_eq!(
            commands[1],
            (
                4,
                ScriptCommand::Set {
                    period: Period::new(2, 2024),
                    amount: 1234.56,
                    category: "cloud hosting".to_string(),
                }
            )
        );
        assert_eq!(
            commands[2].1,
            ScriptCommand::Add {
                kind: CategoryType::Income,
                name: "Consulting Retainers".to_string(),
                is_parent: true,
            }
        );
        assert_eq!(commands[3].1, ScriptCommand::Move(Direction::Next));
        assert_eq!(commands[4].1, ScriptCommand::Intent(GridIntent::ApplyToAllMonths));
    }

    #[test]
    fn test_display_is_script_syntax() {
        let script = "\
start 2024-01
end 2024-12
opening -250.5
add income Grants
add-parent expense Overheads
sub Grants
delete Grants
set 2024-03 1234.56 Cloud Hosting
fill 2024-03 Cloud Hosting
focus 2024-10 Sales
unfocus
move left
intent add-sub
intent apply-all
intent delete
";
        let printed: Vec<String> = parse_script(script)
            .unwrap()
            .iter()
            .map(|(_, command)| command.to_string())
            .collect();

        assert_eq!(printed, script.lines().collect::<Vec<_>>());
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = parse_script("start 2024-01\nfrobnicate\n").unwrap_err();
        assert!(matches!(err, BudgetError::Script { line: 2, .. }));

        let err = parse_script("set 2024-13 5 Sales").unwrap_err();
        assert!(matches!(err, BudgetError::Script { line: 1, .. }));

        let err = parse_script("unfocus now").unwrap_err();
        assert!(err.to_string().contains("unexpected 'now'"));

        assert!(parse_script("add income").is_err());
        assert!(parse_script("move sideways").is_err());
    }

    #[test]
    fn test_run_script() {
        let mut store = BudgetStore::new();
        let script = "\
start 2024-01
end 2024-03
opening 1000
set 2024-01 5000 Sales
set 2024-01 2000 salaries & wages
fill 2024-01 Sales
";
        let summary = run_script(&mut store, script).unwrap();
        assert_eq!(summary.commands, 6);
        assert_eq!(summary.version, store.version());

        let totals = store.totals();
        let jan = Period::new(0, 2024);
        assert_eq!(totals.profit_loss(jan).as_f64(), 3000.0);
        assert_eq!(totals.closing_balance(jan).as_f64(), 4000.0);
        assert_eq!(totals.final_balance().as_f64(), 14000.0);
    }

    #[test]
    fn test_run_script_focus_and_intents() {
        let mut store = BudgetStore::new();
        let script = "\
focus 2024-01 General Income
move down
intent add-sub
move down
intent delete
";
        run_script(&mut store, script).unwrap();

        let names: Vec<_> = store
            .income_categories()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(
            names,
            vec!["General Income", "Sales", "Commission", "Training", "Consulting"]
        );
        assert!(store.focused_cell().is_none());
    }

    #[test]
    fn test_unknown_category_is_script_error() {
        let mut store = BudgetStore::new();
        let err = run_script(&mut store, "opening 10\nset 2024-01 5 Rent\n").unwrap_err();

        match err {
            BudgetError::Script { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("Category not found: Rent"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.opening_balance().as_f64(), 10.0);
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let mut store = BudgetStore::new();
        let long = "x".repeat(51);
        let err = run_script(&mut store, &format!("add expense {}", long)).unwrap_err();
        assert!(matches!(err, BudgetError::Script { line: 1, .. }));
        assert_eq!(store.categories().len(), 9);
    }

    #[test]
    fn test_end_before_start_is_ignored() {
        let mut store = BudgetStore::new();
        run_script(&mut store, "start 2024-06\nend 2024-02\n").unwrap();
        assert_eq!(store.end_period(), Period::new(11, 2024));
    }
}
