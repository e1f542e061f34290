//! Integration tests for cloud-allowlist
//!
//! These tests drive the complete workflow from fetching provider data to
//! writing the output files, against a local HTTP server serving fixtures.

use clap::Parser;
use cloud_allowlist::{
    cli::Args,
    emit,
    models::{DiscoveredSet, Prefix},
    output::format_routes,
    processing::AllowList,
    providers::{build_client, discover, Endpoints, Provider, ServiceFilter},
    OutputTargets,
};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const M365_DATA: &str = "src/tests/test_data/m365_endpoints.json";
const GITHUB_DATA: &str = "src/tests/test_data/github_meta.json";

/// Serve the same canned response to every request, returning the base URL.
async fn serve(status: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let body = body.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    format!("http://{addr}/meta")
}

fn fixture(path: &str) -> String {
    std::fs::read_to_string(path).expect("Error reading fixture")
}

async fn fixture_endpoints() -> Endpoints {
    Endpoints {
        microsoft: serve("200 OK", fixture(M365_DATA)).await,
        github: serve("200 OK", fixture(GITHUB_DATA)).await,
    }
}

#[tokio::test]
async fn test_full_workflow_from_local_server() {
    let endpoints = fixture_endpoints().await;
    let client = build_client(Duration::from_secs(5)).unwrap();
    let discovered = discover(
        &client,
        &[Provider::Microsoft, Provider::Github],
        &endpoints,
        ServiceFilter::All,
    )
    .await
    .expect("Discovery failed");
    assert_eq!(discovered.len(), 22, "10 Microsoft + 12 GitHub ranges");

    let dir = tempfile::tempdir().unwrap();
    let targets = OutputTargets {
        dir: dir.path().to_path_buf(),
        routes: true,
        allow_list: true,
    };
    let now = chrono::Local::now();
    let report = emit(discovered, "m365-github", ServiceFilter::All, &targets, &now).unwrap();

    let routes = std::fs::read_to_string(report.routes_file.unwrap()).unwrap();
    assert_eq!(routes, format_routes(&report.discovered));

    let allow_file = report.allow_list_file.unwrap();
    let file_name = allow_file.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.ends_with("_wireguard_allowList_all.txt"), "{file_name}");

    let allow = std::fs::read_to_string(&allow_file).unwrap();
    let body = allow.strip_prefix("AllowedIPs = ").expect("missing prefix");
    let emitted: Vec<Prefix> = body.split(", ").map(|p| Prefix::new(p).unwrap()).collect();
    assert_eq!(emitted, report.allow_list);

    // nothing discovered is allowed, neighbours are
    for blocked in ["13.107.6.152", "40.100.1.1", "140.82.112.5", "2606:50c0::1", "2603:1006::1"] {
        let addr = blocked.parse().unwrap();
        assert!(emitted.iter().all(|p| !p.contains(addr)), "{blocked} allowed");
    }
    for open in ["1.1.1.1", "140.82.128.0", "2001:4860::8888"] {
        let addr = open.parse().unwrap();
        assert!(emitted.iter().any(|p| p.contains(addr)), "{open} blocked");
    }

    // ascending, IPv4 first
    let mut sorted = emitted.clone();
    sorted.sort();
    assert_eq!(emitted, sorted);
}

#[tokio::test]
async fn test_run_writes_both_files() {
    let endpoints = fixture_endpoints().await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let args = Args::try_parse_from([
        "cloud-allowlist",
        "-f",
        "Skype",
        "-p",
        "microsoft",
        "-o",
        out.to_str().unwrap(),
        "--microsoft-url",
        &endpoints.microsoft,
    ])
    .unwrap();

    let report = cloud_allowlist::run(&args).await.expect("Run failed");
    assert_eq!(report.discovered.len(), 3);

    let routes_name = report.routes_file.unwrap();
    let routes_name = routes_name.file_name().unwrap().to_string_lossy().to_string();
    assert!(routes_name.ends_with("_m365_routes_Skype.txt"), "{routes_name}");
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 2);
}

#[tokio::test]
async fn test_empty_body_is_fatal() {
    let endpoints = Endpoints {
        microsoft: serve("200 OK", String::new()).await,
        github: serve("200 OK", fixture(GITHUB_DATA)).await,
    };
    let client = build_client(Duration::from_secs(5)).unwrap();
    let err = discover(
        &client,
        &[Provider::Microsoft, Provider::Github],
        &endpoints,
        ServiceFilter::All,
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("failed to get any data"), "{err}");
}

#[tokio::test]
async fn test_error_status_is_fatal() {
    let endpoints = Endpoints {
        microsoft: String::new(),
        github: serve("500 Internal Server Error", "{}".to_string()).await,
    };
    let client = build_client(Duration::from_secs(5)).unwrap();
    let err = discover(&client, &[Provider::Github], &endpoints, ServiceFilter::All)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("500"), "{err}");
}

#[tokio::test]
async fn test_malformed_json_is_fatal() {
    let endpoints = Endpoints {
        microsoft: serve("200 OK", "[{\"id\": 1, \"serviceArea\": 7}]".to_string()).await,
        github: String::new(),
    };
    let client = build_client(Duration::from_secs(5)).unwrap();
    let err = discover(&client, &[Provider::Microsoft], &endpoints, ServiceFilter::All)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("failed to unmarshal JSON"), "{err}");
}

#[test]
fn test_emit_without_files() {
    let dir = tempfile::tempdir().unwrap();
    let targets = OutputTargets {
        dir: dir.path().to_path_buf(),
        routes: false,
        allow_list: false,
    };
    let discovered: DiscoveredSet = ["10.0.0.0/8", "::/0"].into_iter().collect();
    let report = emit(
        discovered,
        "m365",
        ServiceFilter::All,
        &targets,
        &chrono::Local::now(),
    )
    .unwrap();

    assert!(report.routes_file.is_none() && report.allow_list_file.is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    let names: Vec<String> = report.allow_list.iter().map(|p| p.to_string()).collect();
    assert_eq!(names[2], "11.0.0.0/8");
    assert!(names.iter().all(|n| !n.contains(':')), "IPv6 fully removed");
}

#[test]
fn test_malformed_entry_among_valid() {
    let discovered: DiscoveredSet = ["not-an-ip", "10.0.0.0/8", "192.168.1.1"]
        .into_iter()
        .collect();
    let allow_list = AllowList::from_discovered(&discovered).unwrap();
    assert!(!allow_list.contains("10.9.9.9".parse().unwrap()));
    assert!(!allow_list.contains("192.168.1.1".parse().unwrap()));
    assert!(allow_list.contains("192.168.1.2".parse().unwrap()));
}
