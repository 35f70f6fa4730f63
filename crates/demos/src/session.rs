//! Instruction interpreter for scripted name store sessions.
//!
//! Instructions follow the format:
//!
//! `ACTION [argument]`
//!
//! where:
//! - ACTION := "ADD" | "REMOVE" | "SHOW" | "SORTED" | "CLEAR" | "WAIT"
//! - ADD and REMOVE take a name, the rest of the line (may be empty)
//! - WAIT takes a number of milliseconds
//!
//! Examples:
//! - `ADD 1234`
//! - `WAIT 500`
//! - `CLEAR`

use std::time::Duration;

use anyhow::Context;
use name_store::{
    NameListRequest, NameListResponse, NameListService, NameViewDefaultStack, NameViewRequest,
    NameViewResponse,
};
use tower::{Service, ServiceExt};
use tracing::info;

/// Script used when no script file is given.
pub const DEFAULT_SCRIPT: &str = "\
# Names containing the bad pattern are removed once the list settles
ADD 456
ADD 123
ADD 1234
SHOW
SORTED
WAIT 500
SHOW
ADD zeta
ADD alpha
SORTED
CLEAR
SHOW
";

/// Represents a command action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Remove,
    Show,
    Sorted,
    Clear,
    Wait,
}

impl Command {
    /// Parse a command from a string
    fn parse(s: &str) -> anyhow::Result<Self> {
        match s.to_uppercase().as_str() {
            "ADD" | "A" => Ok(Command::Add),
            "REMOVE" | "RM" => Ok(Command::Remove),
            "SHOW" | "LS" => Ok(Command::Show),
            "SORTED" | "SORT" => Ok(Command::Sorted),
            "CLEAR" => Ok(Command::Clear),
            "WAIT" | "SLEEP" => Ok(Command::Wait),
            _ => Err(anyhow::anyhow!("Unknown command: {}", s)),
        }
    }

    fn takes_argument(&self) -> bool {
        matches!(self, Command::Add | Command::Remove | Command::Wait)
    }
}

/// A complete instruction: ACTION [argument]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Nil,
    Add(String),
    Remove(String),
    Show,
    Sorted,
    Clear,
    Wait(Duration),
}

impl TryFrom<&str> for Instruction {
    type Error = anyhow::Error;

    fn try_from(s: &str) -> Result<Instruction, Self::Error> {
        let line = s.trim_start();

        // Skip empty lines and comments
        if line.trim().is_empty() || line.starts_with('#') {
            return Ok(Instruction::Nil);
        }

        let (action, argument) = match line.split_once(char::is_whitespace) {
            Some((action, argument)) => (action, Some(argument)),
            None => (line, None),
        };
        let command = Command::parse(action)?;
        if !command.takes_argument() && argument.is_some_and(|a| !a.trim().is_empty()) {
            return Err(anyhow::anyhow!("{:?} takes no argument", command));
        }

        Ok(match command {
            Command::Add => Instruction::Add(argument.unwrap_or_default().to_string()),
            Command::Remove => Instruction::Remove(argument.unwrap_or_default().to_string()),
            Command::Show => Instruction::Show,
            Command::Sorted => Instruction::Sorted,
            Command::Clear => Instruction::Clear,
            Command::Wait => {
                let ms = argument
                    .map(str::trim)
                    .context("WAIT requires a duration in milliseconds")?
                    .parse::<u64>()
                    .context("Invalid WAIT duration")?;
                Instruction::Wait(Duration::from_millis(ms))
            }
        })
    }
}

/// Parse a whole script, reporting the first faulty line.
pub fn parse_script(script: &str) -> anyhow::Result<Vec<Instruction>> {
    script
        .lines()
        .enumerate()
        .map(|(index, line)| {
            Instruction::try_from(line).with_context(|| format!("line {}: {:?}", index + 1, line))
        })
        .filter(|instruction| !matches!(instruction, Ok(Instruction::Nil)))
        .collect()
}

/// Runs instructions against a list and its view
pub struct Session {
    list: NameListService,
    view: NameViewDefaultStack,
}

impl Session {
    pub fn new(list: NameListService, view: NameViewDefaultStack) -> Self {
        Self { list, view }
    }

    /// Execute one instruction, returning the names it produced if any.
    pub async fn execute(
        &mut self,
        instruction: &Instruction,
    ) -> anyhow::Result<Option<Vec<String>>> {
        match instruction {
            Instruction::Nil => Ok(None),
            Instruction::Add(name) => {
                self.list.ready().await?.call(NameListRequest::AddName(name.clone())).await?;
                Ok(None)
            }
            Instruction::Remove(name) => {
                self.list.ready().await?.call(NameListRequest::RemoveName(name.clone())).await?;
                Ok(None)
            }
            Instruction::Show => {
                match self.list.ready().await?.call(NameListRequest::GetNames).await? {
                    NameListResponse::Names(names) => {
                        info!("names: {:?}", names);
                        Ok(Some(names.to_vec()))
                    }
                    other => Err(anyhow::anyhow!("Unexpected response: {:?}", other)),
                }
            }
            Instruction::Sorted => {
                match self.view.ready().await?.call(NameViewRequest::SortedNames).await? {
                    NameViewResponse::SortedNames(names) => {
                        info!("sorted names: {:?}", names);
                        Ok(Some(names))
                    }
                    other => Err(anyhow::anyhow!("Unexpected response: {:?}", other)),
                }
            }
            Instruction::Clear => {
                match self.view.ready().await?.call(NameViewRequest::ClearAll).await? {
                    NameViewResponse::Cleared(count) => {
                        info!("cleared {} names", count);
                        Ok(None)
                    }
                    other => Err(anyhow::anyhow!("Unexpected response: {:?}", other)),
                }
            }
            Instruction::Wait(duration) => {
                tokio::time::sleep(*duration).await;
                Ok(None)
            }
        }
    }

    /// Execute a script, instruction by instruction.
    pub async fn run(&mut self, instructions: &[Instruction]) -> anyhow::Result<()> {
        for instruction in instructions {
            self.execute(instruction).await?;
        }
        Ok(())
    }
}
