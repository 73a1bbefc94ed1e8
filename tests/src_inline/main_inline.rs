use super::*;

#[test]
fn test_parse_run_defaults() {
    let cli = Cli::try_parse_from(["eff-verifier", "run", "--base", "main"]).unwrap();
    let Command::Run(args) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(args.base, "main");
    assert_eq!(args.head, "HEAD");
    assert_eq!(args.out, PathBuf::from("metrics/nss.jsonl"));
    assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    assert_eq!(args.velocity_window_days, 7);
    assert!(!args.post_comment);
}

#[test]
fn test_parse_run_github_flags() {
    let cli = Cli::try_parse_from([
        "eff-verifier",
        "-v",
        "run",
        "--base",
        "origin/main",
        "--repo",
        "acme/widgets",
        "--pr-number",
        "12",
        "--token",
        "t0k",
        "--post-comment",
        "--defect-recovery-hours",
        "6.5",
    ])
    .unwrap();
    assert!(cli.verbose);
    let Command::Run(args) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(args.repo.as_deref(), Some("acme/widgets"));
    assert_eq!(args.pr_number, Some(12));
    assert_eq!(args.token.as_deref(), Some("t0k"));
    assert_eq!(args.defect_recovery_hours, Some(6.5));
    assert!(args.post_comment);
}

#[test]
fn test_parse_score_command() {
    let cli =
        Cli::try_parse_from(["eff-verifier", "score", "--observations", "obs.json"]).unwrap();
    let Command::Score(args) = cli.command else {
        panic!("expected score");
    };
    assert_eq!(args.observations, PathBuf::from("obs.json"));
    assert!(args.config.is_none());
}

#[test]
fn test_parse_observations() {
    let obs = parse_observations(
        r#"{"cycle_time": 0, "merge_velocity": null, "doc_test_depth": 0.4, "lead_time": 3}"#,
    )
    .unwrap();
    assert_eq!(obs.get(Metric::CycleTime), Some(0.0));
    assert_eq!(obs.get(Metric::MergeVelocity), None);
    assert_eq!(obs.get(Metric::DocTestDepth), Some(0.4));
    assert_eq!(obs.present_count(), 2);
}

#[test]
fn test_parse_observations_rejects_non_numbers() {
    assert!(parse_observations(r#"{"cycle_time": "fast"}"#).is_err());
    assert!(parse_observations("[1, 2]").is_err());
}

#[test]
fn test_exit_codes() {
    let diff = RunError::Pipeline(PipelineError::Diff {
        base: "nope".to_string(),
        head: "HEAD".to_string(),
        source: input::InputError::Parse("bad".to_string()),
    });
    assert_eq!(diff.exit_code(), 2);
    let obs = RunError::Observations {
        path: PathBuf::from("obs.json"),
        message: "missing".to_string(),
    };
    assert_eq!(obs.exit_code(), 1);
}

#[test]
fn test_empty_pr_number_means_no_pr() {
    // PR_NUMBER feeds the same value parser as the flag
    let cli = Cli::try_parse_from(["eff-verifier", "run", "--pr-number", ""]).unwrap();
    let Command::Run(args) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(args.pr_number(), None);
}

#[test]
fn test_parse_pr_number() {
    assert_eq!(parse_pr_number(""), Ok(0));
    assert_eq!(parse_pr_number("  "), Ok(0));
    assert_eq!(parse_pr_number("17"), Ok(17));
    assert!(parse_pr_number("seventeen").is_err());
    assert!(Cli::try_parse_from(["eff-verifier", "run", "--pr-number", "x1"]).is_err());
}

#[test]
fn test_zero_pr_number_means_no_pr() {
    let cli = Cli::try_parse_from(["eff-verifier", "run", "--pr-number", "0"]).unwrap();
    let Command::Run(args) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(args.pr_number(), None);
}
