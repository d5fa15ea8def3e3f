use clap::CommandFactory;
use uuid::Uuid;

use super::*;

fn asset(url: &str) -> Asset {
    Asset { id: Uuid::new_v4(), url: url.into(), kind: canvas::doc::AssetKind::Raster, content: None }
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn ingest_requires_a_source() {
    assert!(Cli::try_parse_from(["profileboard", "ingest"]).is_err());
    let cli = Cli::try_parse_from(["profileboard", "ingest", "a.svg", "https://x/y.png"]).unwrap();
    assert!(matches!(cli.command, Command::Ingest { sources } if sources.len() == 2));
}

#[test]
fn place_parses_ids_and_flags() {
    let id = Uuid::new_v4();
    let cli = Cli::try_parse_from([
        "profileboard",
        "--log-level",
        "debug",
        "place",
        "--assets",
        "assets.json",
        &id.to_string(),
        "--clipboard",
    ])
    .unwrap();
    assert_eq!(cli.log_level, tracing::Level::DEBUG);
    let Command::Place(args) = cli.command else {
        panic!("expected place");
    };
    assert_eq!(args.asset_ids, vec![id]);
    assert!(args.clipboard);
    assert_eq!(args.assets, PathBuf::from("assets.json"));
}

#[test]
fn place_rejects_malformed_ids() {
    assert!(Cli::try_parse_from(["profileboard", "place", "--assets", "a.json", "not-a-uuid"]).is_err());
}

#[test]
fn build_board_places_every_asset_by_default() {
    let assets = vec![asset("blob:a"), asset("blob:b")];
    let board = build_board(assets, &[]).unwrap();
    assert_eq!(board.items.len(), 2);
    assert!(board.items.iter().all(|i| (i.x, i.y) == (50.0, 50.0)));
}

#[test]
fn build_board_follows_requested_order_and_repeats() {
    let assets = vec![asset("blob:a"), asset("blob:b")];
    let (a, b) = (assets[0].id, assets[1].id);
    let board = build_board(assets, &[b, a, b]).unwrap();
    let urls: Vec<&str> = board.items.iter().map(|i| i.url.as_str()).collect();
    assert_eq!(urls, ["blob:b", "blob:a", "blob:b"]);
}

#[test]
fn build_board_rejects_unknown_asset() {
    let err = build_board(vec![asset("blob:a")], &[Uuid::new_v4()]).unwrap_err();
    assert!(matches!(err, CliError::Board(_)));
}

#[test]
fn asset_list_round_trips_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assets.json");
    let assets = vec![asset("blob:a")];
    fs::write(&path, serde_json::to_string(&assets).unwrap()).unwrap();
    assert_eq!(read_assets(&path).unwrap(), assets);

    fs::write(&path, "{").unwrap();
    assert!(matches!(read_assets(&path), Err(CliError::AssetList { .. })));
}

#[test]
fn render_writes_svg_document() {
    let dir = tempfile::tempdir().unwrap();
    let layout = dir.path().join("layout.json");
    let out = dir.path().join("board.svg");
    let board = build_board(vec![asset("https://x/y.png")], &[]).unwrap();
    fs::write(&layout, export::export_layout(&board.items).unwrap()).unwrap();

    run_render(RenderArgs { layout, assets: None, out: Some(out.clone()) }).unwrap();
    let svg = fs::read_to_string(out).unwrap();
    assert!(svg.contains("viewBox=\"0 0 800 600\""));
    assert!(svg.contains("href=\"https://x/y.png\""));
}
