use super::*;

#[test]
fn test_cli_parses_positional_update_args() {
    let cli =
        Cli::try_parse_from(["proven-leaderboard", "score.txt", "meta.json", "alice"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.store, PathBuf::from(DEFAULT_STORE));
    let request =
        build_update_request(cli.score_file, cli.metadata_file, cli.username, cli.store).unwrap();
    assert_eq!(request.score_path, PathBuf::from("score.txt"));
    assert_eq!(request.metadata_path, PathBuf::from("meta.json"));
    assert_eq!(request.username, "alice");
}

#[test]
fn test_cli_requires_all_three_update_args() {
    assert!(Cli::try_parse_from(["proven-leaderboard", "score.txt", "meta.json"]).is_err());
    assert!(Cli::try_parse_from(["proven-leaderboard"]).is_err());
}

#[test]
fn test_cli_store_override() {
    let cli = Cli::try_parse_from([
        "proven-leaderboard",
        "--store",
        "/tmp/lb.csv",
        "score.txt",
        "meta.json",
        "alice",
    ])
    .unwrap();
    assert_eq!(cli.store, PathBuf::from("/tmp/lb.csv"));
}

#[test]
fn test_cli_rank_subcommand() {
    let cli = Cli::try_parse_from([
        "proven-leaderboard",
        "rank",
        "--sort",
        "accuracy",
        "--asc",
        "--model",
        "gcn",
        "--format",
        "json",
        "--store",
        "lb.csv",
    ])
    .unwrap();
    let Some(Command::Rank(args)) = cli.command else {
        panic!("expected rank subcommand");
    };
    assert_eq!(args.sort, SortKey::Accuracy);
    assert_eq!(rank_direction(&args), Some(SortDirection::Asc));
    assert_eq!(args.model.as_deref(), Some("gcn"));
    assert_eq!(args.format, OutputFormat::Json);
    assert_eq!(cli.store, PathBuf::from("lb.csv"));
}

#[test]
fn test_cli_rank_defaults_and_conflicts() {
    let cli = Cli::try_parse_from(["proven-leaderboard", "rank"]).unwrap();
    let Some(Command::Rank(args)) = cli.command else {
        panic!("expected rank subcommand");
    };
    assert_eq!(args.sort, SortKey::MacroF1);
    assert_eq!(rank_direction(&args), None);
    assert_eq!(args.format, OutputFormat::Text);

    assert!(Cli::try_parse_from(["proven-leaderboard", "rank", "--asc", "--desc"]).is_err());
}

#[test]
fn test_missing_update_args_map_to_input_error() {
    let err = build_update_request(None, None, None, PathBuf::from("lb.csv")).unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));
}

#[test]
fn test_cli_rank_after_global_store_flag() {
    let cli = Cli::try_parse_from(["proven-leaderboard", "--store", "lb.csv", "rank"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Rank(_))));
    assert_eq!(cli.store, PathBuf::from("lb.csv"));
    assert!(cli.check_command_position().is_ok());
}

#[test]
fn test_username_rank_needs_double_dash() {
    let cli =
        Cli::try_parse_from(["proven-leaderboard", "score.txt", "meta.json", "--", "rank"])
            .unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.username.as_deref(), Some("rank"));
    assert!(cli.check_command_position().is_ok());

    let cli =
        Cli::try_parse_from(["proven-leaderboard", "score.txt", "meta.json", "rank"]).unwrap();
    let err = cli.check_command_position().unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    assert_eq!(err.exit_code(), 2);
}
