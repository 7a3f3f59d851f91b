use super::*;

#[derive(Parser)]
#[command(author, version, about)]
pub(super) struct Cli {
    #[arg(help = "Path to the repo list (defaults to ~/.repos.yaml)")]
    pub(super) config: Option<PathBuf>,
    #[arg(
        long,
        default_value = "./status_cmd",
        help = "Command invoked as `<status-cmd> <path>` to check a repo"
    )]
    pub(super) status_cmd: String,
    #[arg(
        long,
        default_value = "./sync_cmd",
        help = "Command invoked as `<sync-cmd> <path> [push]` to sync a repo"
    )]
    pub(super) sync_cmd: String,
    #[arg(
        long,
        default_value_t = 10,
        help = "Seconds between automatic re-check passes"
    )]
    pub(super) interval: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_external_contract() {
        let cli = Cli::parse_from(["repodash"]);
        assert_eq!(cli.status_cmd, "./status_cmd");
        assert_eq!(cli.sync_cmd, "./sync_cmd");
        assert_eq!(cli.interval, 10);
        assert!(cli.config.is_none());
    }

    #[test]
    fn positional_config_path_is_accepted() {
        let cli = Cli::parse_from(["repodash", "/tmp/repos.yaml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/repos.yaml")));
    }
}
