use async_trait::async_trait;

use crate::application::errors::{BotError, CommandError};
use crate::application::messaging::{parse_command, ReplyChunker};
use crate::domain::entities::{Command, CommandRegistry, Target};
use crate::domain::traits::HistoryStore;

/// Everything a command may touch while it runs
pub struct CommandContext<'a> {
    /// History key of the chat the command came from
    pub identity: &'a str,
    /// Where replies go
    pub target: &'a Target,
    pub chunker: &'a ReplyChunker,
    pub store: &'a dyn HistoryStore,
}

/// Behaviour behind a registered command
#[async_trait]
pub trait CommandAction: Send + Sync {
    async fn exec(&self, ctx: &CommandContext<'_>, args: &str) -> Result<(), BotError>;
}

pub const HELP_MESSAGE: &str = "========\n\
    /cmd help\n\
    # 显示帮助信息\n\
    /cmd prompt <PROMPT>\n\
    # 设置当前会话的 prompt\n\
    画 <PROMPT>\n\
    # 根据 prompt 生成图片\n\
    /cmd clear\n\
    # 清除自上次启动以来的所有会话\n\
    ========";

struct HelpCommand;

#[async_trait]
impl CommandAction for HelpCommand {
    async fn exec(&self, ctx: &CommandContext<'_>, _args: &str) -> Result<(), BotError> {
        ctx.chunker.send(ctx.target, HELP_MESSAGE).await
    }
}

struct PromptCommand;

#[async_trait]
impl CommandAction for PromptCommand {
    async fn exec(&self, ctx: &CommandContext<'_>, args: &str) -> Result<(), BotError> {
        if args.is_empty() {
            return Err(CommandError::InvalidArgs("prompt text is required".to_string()).into());
        }
        ctx.store.set_prompt(ctx.identity, args).await;
        tracing::info!("Prompt for {} set to: {}", ctx.identity, args);
        Ok(())
    }
}

struct ClearCommand;

#[async_trait]
impl CommandAction for ClearCommand {
    async fn exec(&self, ctx: &CommandContext<'_>, _args: &str) -> Result<(), BotError> {
        ctx.store.clear_history(ctx.identity).await;
        tracing::info!("History cleared for {}", ctx.identity);
        Ok(())
    }
}

/// Parses command lines and runs the matching registered command
pub struct CommandDispatcher {
    registry: CommandRegistry,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self {
            registry: CommandRegistry::new(),
        }
    }

    /// Dispatcher with the built-in `help`, `prompt` and `clear` commands
    pub fn with_defaults() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register_defaults();
        dispatcher
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self) {
        self.register(Command::new("help", HelpCommand)
            .with_description("显示帮助信息")
            .with_usage("/cmd help"));

        self.register(Command::new("prompt", PromptCommand)
            .with_description("设置当前会话的prompt")
            .with_usage("/cmd prompt <PROMPT>"));

        self.register(Command::new("clear", ClearCommand)
            .with_description("清除自上次启动以来的所有会话")
            .with_usage("/cmd clear"));
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.registry.all()
    }

    /// Run the command named by the first token of `line`.
    ///
    /// Unknown names are silently ignored. Invalid arguments are logged and dropped.
    pub async fn dispatch(&self, ctx: &CommandContext<'_>, line: &str) -> Result<(), BotError> {
        let parsed = parse_command(line);
        let Some(cmd) = self.registry.get(&parsed.name) else {
            tracing::debug!("Ignoring unknown command: {:?}", parsed.name);
            return Ok(());
        };

        match cmd.action.exec(ctx, &parsed.args).await {
            Err(BotError::Command(e)) => {
                tracing::warn!("Command {} failed for {}: {}", cmd.name, ctx.identity, e);
                Ok(())
            }
            other => other,
        }
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
