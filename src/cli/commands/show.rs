//! Show command implementation.
//!
//! `deployinfo show` prints the deployment context of this process.

use crate::cli::args::ShowArgs;
use crate::deployment::{deployment_vars, DeploymentContext};
use crate::error::{Error, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{self, ContextReport};

/// The show command implementation.
pub struct ShowCommand {
    context: DeploymentContext,
    args: ShowArgs,
}

impl ShowCommand {
    /// Create a new show command.
    pub fn new(context: DeploymentContext, args: ShowArgs) -> Self {
        Self { context, args }
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.json {
            let json = serde_json::to_string_pretty(&ContextReport::from(&self.context))
                .map_err(|e| Error::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        if self.args.env {
            display::show_environment(ui, &deployment_vars());
        }
        display::show_context(ui, &self.context);

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployment::ContextBuilder;
    use crate::ui::MockUI;
    use std::collections::HashMap;

    fn deployed_context() -> DeploymentContext {
        let mut env = HashMap::new();
        env.insert("CLICKONCE_ISNETWORKDEPLOYED".to_string(), "True".to_string());
        env.insert("CLICKONCE_CURRENTVERSION".to_string(), "1.0.0.3".to_string());
        env.insert(
            "CLICKONCE_UPDATELOCATION".to_string(),
            "https://deploy.example.com/Contoso.application".to_string(),
        );
        ContextBuilder::new(env)
            .base_directory("/opt/contoso")
            .target_framework("x86_64-linux")
            .build()
    }

    #[test]
    fn prints_report() {
        let cmd = ShowCommand::new(deployed_context(), ShowArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("1.0.0.3"));
        assert!(ui.has_message("https://deploy.example.com/Contoso.application"));
        assert!(ui.has_message("x86_64-linux"));
        assert_eq!(ui.headers(), ["Deployment".to_string()]);
    }

    #[test]
    fn prints_json() {
        let args = ShowArgs {
            json: true,
            env: false,
        };
        let cmd = ShowCommand::new(deployed_context(), args);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let json: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(json["is_network_deployed"], true);
        assert_eq!(json["current_version"], "1.0.0.3");
        assert!(json["updated_version"].is_null());
        assert_eq!(json["application_name"], "Contoso");
        assert!(ui.headers().is_empty());
    }

    #[test]
    fn env_flag_adds_environment_section() {
        let args = ShowArgs {
            json: false,
            env: true,
        };
        let cmd = ShowCommand::new(deployed_context(), args);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();
        assert_eq!(
            ui.headers(),
            ["Environment".to_string(), "Deployment".to_string()]
        );
    }
}
