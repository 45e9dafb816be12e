use std::fs;
use std::path::Path;

use clap::Parser;
use roadnet::Cli;
use tempfile::TempDir;

const NODES: &str = "\
id,x,y
1,0.0,0.0
2,100.0,0.0
3,200.0,0.0
4,100.0,300.0
";

const EDGES: &str = "\
source,target,length,highway,maxspeed
1,2,100.0,residential,
2,3,100.0,residential,
1,4,320.0,primary,90
4,3,320.0,primary,not posted
2,4,300.0,cycleway,
";

fn write_inputs(dir: &Path) {
    fs::write(dir.join("nodes.csv"), NODES).unwrap();
    fs::write(dir.join("edges.csv"), EDGES).unwrap();
}

fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("roadnet").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    cli.run(&mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn summary_from_config_file() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());
    let config = dir.path().join("roadnet.toml");
    fs::write(
        &config,
        "[network]\nnodes_path = \"nodes.csv\"\nedges_path = \"edges.csv\"\nbidirectional = true\n",
    )
    .unwrap();

    let output = run(&["summary", "--config", config.to_str().unwrap()]).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&output).unwrap();

    // cycleway excluded, remaining four roads in both directions
    assert_eq!(summary["edges"], 8);
    assert_eq!(summary["nodes"], 4);
    assert_eq!(summary["posted_speeds"], 2);
    assert_eq!(summary["malformed_speed_tags"], 2);
}

#[test]
fn route_prints_distance_and_travel_time() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());
    let nodes = dir.path().join("nodes.csv");
    let edges = dir.path().join("edges.csv");

    let output = run(&[
        "route",
        "--nodes",
        nodes.to_str().unwrap(),
        "--edges",
        edges.to_str().unwrap(),
        "--from",
        "1",
        "--to",
        "195,-5",
    ])
    .unwrap();

    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("distance: 1 -> 3 via 2 edges, 200.0 m"));
    assert!(lines[1].starts_with("travel-time: 1 -> 3 via 2 edges, 640.0 m"));
}

#[test]
fn export_edges_writes_geojson() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());
    let target = dir.path().join("edges.geojson");

    run(&[
        "export-edges",
        "--nodes",
        dir.path().join("nodes.csv").to_str().unwrap(),
        "--edges",
        dir.path().join("edges.csv").to_str().unwrap(),
        "--output",
        target.to_str().unwrap(),
    ])
    .unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(written["type"], "FeatureCollection");
    assert_eq!(written["features"].as_array().unwrap().len(), 4);
}

#[test]
fn centrality_table_and_points() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());
    let points = dir.path().join("centrality.geojson");

    let output = run(&[
        "centrality",
        "--bidirectional",
        "--nodes",
        dir.path().join("nodes.csv").to_str().unwrap(),
        "--edges",
        dir.path().join("edges.csv").to_str().unwrap(),
        "--top",
        "2",
        "--output",
        points.to_str().unwrap(),
    ])
    .unwrap();

    assert!(output.starts_with("4 nodes scored"));
    assert_eq!(output.lines().count(), 4);
    assert!(points.exists());
}

#[test]
fn inputs_are_required() {
    assert!(run(&["summary"]).is_err());
}
