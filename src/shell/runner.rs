use super::command::{Command, HELP};
use crate::application_port::SocialNetworkService;
use crate::logger::*;
use anyhow::Result;
use std::collections::BTreeSet;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Runs one command and renders the reply.
pub async fn execute(service: &dyn SocialNetworkService, command: &Command) -> Result<String> {
    let reply = match command {
        Command::Join(username) => {
            let account = service.join(username).await?;
            format!("joined as {}", account.username())
        }
        Command::Login(username) => {
            let account = service.login(username).await?;
            format!("logged in as {}", account.username())
        }
        Command::Logout => {
            service.logout().await;
            "logged out".to_string()
        }
        Command::WhoAmI => {
            let account = service.current_account().await?;
            serde_json::to_string_pretty(&account)?
        }
        Command::Has(username) => service.has_member(username).await?.to_string(),
        Command::Members => render(&service.list_members().await?),
        Command::Send(username) => {
            service.send_friendship_to(username).await?;
            format!("friend request sent to {username}")
        }
        Command::Cancel(username) => {
            service.send_friendship_cancellation_to(username).await?;
            format!("friend request to {username} withdrawn")
        }
        Command::Accept(username) => {
            service.accept_friendship_from(username).await?;
            format!("accepted {username}")
        }
        Command::Reject(username) => {
            service.reject_friendship_from(username).await?;
            format!("rejected {username}")
        }
        Command::AcceptAll => {
            service.accept_all_friendships().await?;
            "accepted all pending requests".to_string()
        }
        Command::RejectAll => {
            service.reject_all_friendships().await?;
            "rejected all pending requests".to_string()
        }
        Command::AutoAccept(true) => {
            service.auto_accept_friendships().await?;
            "auto-accept on".to_string()
        }
        Command::AutoAccept(false) => {
            service.cancel_auto_accept_friendships().await?;
            "auto-accept off".to_string()
        }
        Command::Block(username) => {
            service.block(username).await?;
            format!("blocked {username}")
        }
        Command::Unblock(username) => {
            service.unblock(username).await?;
            format!("unblocked {username}")
        }
        Command::Leave => {
            let account = service.leave().await?;
            format!("{} left the network", account.username())
        }
        Command::Recommend => render(&service.recommend_friends().await?),
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    };
    Ok(reply)
}

/// Reads commands line by line until `quit` or end of input. Blank lines and
/// lines starting with `#` are skipped. Failed commands are reported and the
/// loop carries on.
pub async fn run<R, W>(service: &dyn SocialNetworkService, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let reply = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => match execute(service, &command).await {
                Ok(reply) => reply,
                Err(e) => {
                    debug!(%line, error = %e, "command failed");
                    format!("error: {e}")
                }
            },
            Err(e) => format!("error: {e}"),
        };
        output.write_all(reply.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    output.flush().await?;
    Ok(())
}

fn render(names: &BTreeSet<String>) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}
