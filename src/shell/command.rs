use std::str::FromStr;

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join(String),
    Login(String),
    Logout,
    WhoAmI,
    Has(String),
    Members,
    Send(String),
    Cancel(String),
    Accept(String),
    Reject(String),
    AcceptAll,
    RejectAll,
    AutoAccept(bool),
    Block(String),
    Unblock(String),
    Leave,
    Recommend,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("`{0}` expects a username")]
    MissingUsername(&'static str),
    #[error("`{0}` takes no arguments")]
    UnexpectedArgument(&'static str),
    #[error("`{0}` takes a single argument")]
    TooManyArguments(&'static str),
    #[error("`auto-accept` expects `on` or `off`, got {0:?}")]
    BadToggle(String),
}

pub const HELP: &str = "\
join <user>        create an account
login <user>       switch the session to <user>
logout             end the session
whoami             show the session account
has <user>         is <user> a visible member?
members            list visible members
send <user>        send a friend request
cancel <user>      withdraw a friend request
accept <user>      accept a friend request
reject <user>      reject a friend request
accept-all         accept every pending request
reject-all         reject every pending request
auto-accept on|off toggle automatic acceptance
block <user>       block a member
unblock <user>     unblock a member
leave              delete the session account
recommend          friends of friends you may know
help               this text
quit               exit";

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().ok_or(CommandParseError::Empty)?;
        let arg = words.next();
        let surplus = words.next().is_some();

        let username = |command: &'static str| match arg {
            _ if surplus => Err(CommandParseError::TooManyArguments(command)),
            Some(name) => Ok(name.to_owned()),
            None => Err(CommandParseError::MissingUsername(command)),
        };
        let bare = |command: &'static str, value: Command| match arg {
            Some(_) => Err(CommandParseError::UnexpectedArgument(command)),
            None => Ok(value),
        };

        match name {
            "join" => username("join").map(Command::Join),
            "login" => username("login").map(Command::Login),
            "has" => username("has").map(Command::Has),
            "send" => username("send").map(Command::Send),
            "cancel" => username("cancel").map(Command::Cancel),
            "accept" => username("accept").map(Command::Accept),
            "reject" => username("reject").map(Command::Reject),
            "block" => username("block").map(Command::Block),
            "unblock" => username("unblock").map(Command::Unblock),
            "auto-accept" => match arg {
                _ if surplus => Err(CommandParseError::TooManyArguments("auto-accept")),
                Some("on") => Ok(Command::AutoAccept(true)),
                Some("off") => Ok(Command::AutoAccept(false)),
                other => Err(CommandParseError::BadToggle(
                    other.unwrap_or_default().to_owned(),
                )),
            },
            "logout" => bare("logout", Command::Logout),
            "whoami" => bare("whoami", Command::WhoAmI),
            "members" => bare("members", Command::Members),
            "accept-all" => bare("accept-all", Command::AcceptAll),
            "reject-all" => bare("reject-all", Command::RejectAll),
            "leave" => bare("leave", Command::Leave),
            "recommend" => bare("recommend", Command::Recommend),
            "help" => bare("help", Command::Help),
            "quit" | "exit" => bare("quit", Command::Quit),
            other => Err(CommandParseError::Unknown(other.to_owned())),
        }
    }
}
