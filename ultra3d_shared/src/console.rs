//! Console system.
//!
//! Provides:
//! - Console variables (cvars) with typed values and defaults
//! - Command registration and execution
//! - Command history
//! - Input parsing with quoted arguments
//!
//! The game loop is single-threaded, so handlers get direct mutable access
//! to the cvar table through [`ConsoleContext`].
//!
//! # Usage
//! ```ignore
//! let mut console = Console::new();
//! console.register_cvar("cam_lag", CvarValue::Float(0.08), "Camera smoothing");
//! console.exec("cam_lag 0.1")?;
//! ```

use std::collections::{BTreeMap, HashMap};

use anyhow::{bail, Context};

/// Console variable value.
#[derive(Debug, Clone, PartialEq)]
pub enum CvarValue {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
}

impl CvarValue {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CvarValue::Float(v) => Some(*v),
            CvarValue::Int(v) => Some(*v as f64),
            CvarValue::String(s) => s.parse().ok(),
            CvarValue::Bool(_) => None,
        }
    }

    /// Parses a typed value from console text: int, then float, then bool,
    /// then string.
    pub fn parse(text: &str) -> Self {
        if let Ok(v) = text.parse::<i64>() {
            CvarValue::Int(v)
        } else if let Ok(v) = text.parse::<f64>() {
            CvarValue::Float(v)
        } else if text == "true" {
            CvarValue::Bool(true)
        } else if text == "false" {
            CvarValue::Bool(false)
        } else {
            CvarValue::String(text.trim_matches('"').to_string())
        }
    }
}

impl std::fmt::Display for CvarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CvarValue::Int(v) => write!(f, "{}", v),
            CvarValue::Float(v) => write!(f, "{}", v),
            CvarValue::String(v) => write!(f, "\"{}\"", v),
            CvarValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

/// Console variable metadata.
#[derive(Debug, Clone)]
pub struct Cvar {
    pub value: CvarValue,
    pub default: CvarValue,
    pub description: String,
}

/// Command handler function type.
pub type CommandHandler = Box<dyn Fn(&[&str], &mut ConsoleContext<'_>) -> anyhow::Result<()>>;

/// Context passed to command handlers.
pub struct ConsoleContext<'a> {
    /// Output lines for the command.
    pub output: Vec<String>,
    cvars: &'a mut BTreeMap<String, Cvar>,
}

impl ConsoleContext<'_> {
    pub fn print(&mut self, msg: impl Into<String>) {
        self.output.push(msg.into());
    }

    pub fn get_cvar(&self, name: &str) -> Option<&CvarValue> {
        self.cvars.get(name).map(|c| &c.value)
    }

    pub fn set_cvar(&mut self, name: &str, value: CvarValue) -> anyhow::Result<()> {
        match self.cvars.get_mut(name) {
            Some(cvar) => {
                cvar.value = value;
                Ok(())
            }
            None => bail!("unknown cvar: {}", name),
        }
    }
}

/// The console.
pub struct Console {
    cvars: BTreeMap<String, Cvar>,
    commands: HashMap<String, CommandHandler>,
    history: Vec<String>,
    max_history: usize,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        let mut console = Self {
            cvars: BTreeMap::new(),
            commands: HashMap::new(),
            history: Vec::new(),
            max_history: 100,
        };
        console.register_builtin_commands();
        console
    }

    fn register_builtin_commands(&mut self) {
        self.register_command("echo", |args, ctx| {
            ctx.print(args.join(" "));
            Ok(())
        });

        self.register_command("cvarlist", |_args, ctx| {
            let lines: Vec<String> = ctx
                .cvars
                .iter()
                .map(|(name, cvar)| {
                    format!(
                        "  {} = {} (default: {}) - {}",
                        name, cvar.value, cvar.default, cvar.description
                    )
                })
                .collect();
            ctx.output.extend(lines);
            Ok(())
        });

        self.register_command("set", |args, ctx| {
            if args.len() < 2 {
                bail!("usage: set <cvar> <value>");
            }
            let value = CvarValue::parse(&args[1..].join(" "));
            let line = format!("{} = {}", args[0], value);
            ctx.set_cvar(args[0], value)?;
            ctx.print(line);
            Ok(())
        });
    }

    /// Registers a console variable.
    pub fn register_cvar(&mut self, name: &str, default: CvarValue, description: &str) {
        self.cvars.insert(
            name.to_string(),
            Cvar {
                value: default.clone(),
                default,
                description: description.to_string(),
            },
        );
    }

    /// Registers a command.
    pub fn register_command<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&[&str], &mut ConsoleContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.commands.insert(name.to_string(), Box::new(handler));
    }

    /// Names of registered commands, sorted.
    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Executes a console command line.
    pub fn exec(&mut self, line: &str) -> anyhow::Result<Vec<String>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            return Ok(Vec::new());
        }

        self.history.push(line.to_string());
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }

        let tokens = parse_command_line(line);
        let Some((cmd_name, rest)) = tokens.split_first() else {
            return Ok(Vec::new());
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        if cmd_name == "help" {
            let mut out = vec![format!("Commands: {}", self.command_names().join(", "))];
            out.push(format!("Cvars: {}", self.cvars.keys().cloned().collect::<Vec<_>>().join(", ")));
            return Ok(out);
        }

        // Typing a cvar name queries it; adding a value sets it.
        if !self.commands.contains_key(cmd_name.as_str()) {
            if let Some(cvar) = self.cvars.get_mut(cmd_name.as_str()) {
                if args.is_empty() {
                    return Ok(vec![format!(
                        "{} = {} (default: {})",
                        cmd_name, cvar.value, cvar.default
                    )]);
                }
                cvar.value = CvarValue::parse(&args.join(" "));
                return Ok(vec![format!("{} = {}", cmd_name, cvar.value)]);
            }
        }

        let mut ctx = ConsoleContext {
            output: Vec::new(),
            cvars: &mut self.cvars,
        };
        match self.commands.get(cmd_name.as_str()) {
            Some(handler) => {
                handler(&args, &mut ctx).with_context(|| format!("command '{}'", cmd_name))?
            }
            None => ctx.print(format!("Unknown command: {}", cmd_name)),
        }
        Ok(ctx.output)
    }

    /// Gets a cvar value.
    pub fn get_cvar(&self, name: &str) -> Option<&CvarValue> {
        self.cvars.get(name).map(|c| &c.value)
    }

    /// Reads a numeric cvar as `f32`.
    pub fn cvar_f32(&self, name: &str) -> Option<f32> {
        self.get_cvar(name)?.as_float().map(|v| v as f32)
    }

    /// Sets a cvar value.
    pub fn set_cvar(&mut self, name: &str, value: CvarValue) -> anyhow::Result<()> {
        match self.cvars.get_mut(name) {
            Some(cvar) => {
                cvar.value = value;
                Ok(())
            }
            None => bail!("unknown cvar: {}", name),
        }
    }

    /// Gets command history.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

/// Parses a command line into tokens, respecting quotes.
pub fn parse_command_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
