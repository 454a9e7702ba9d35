use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(
        short = 's',
        long = "stdout",
        action,
        help = "Controls if it logs to stdout/stderr instead of to a file"
    )]
    pub is_to_std_out: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Log in and keep the session locally. The password is read from stdin
    Login { email: String },
    /// Show the profile page
    Profile,
    /// Change the name shown on the profile
    Rename { name: String },
    /// Change the password. Current, new and confirmation are read from stdin
    ChangePassword,
    /// Forget the local session
    Logout,
}
