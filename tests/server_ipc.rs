use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use stepwise::api::server::{self, ServerState};

fn send(stream: &mut TcpStream, reader: &mut BufReader<TcpStream>, line: &str) -> serde_json::Value {
    stream.write_all(line.as_bytes()).unwrap();
    stream.write_all(b"\n").unwrap();
    let mut response = String::new();
    reader.read_line(&mut response).unwrap();
    serde_json::from_str(&response).unwrap()
}

#[test]
fn test_ipc_server_lifecycle() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let _ = server::serve(listener, Arc::new(ServerState::default()));
    });

    let mut stream = TcpStream::connect(addr).expect("Failed to connect to server");
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let pong = send(&mut stream, &mut reader, r#"{"command": "PING"}"#);
    assert_eq!(pong["status"], "success");
    assert_eq!(pong["data"], "PONG");

    let analyzed = send(
        &mut stream,
        &mut reader,
        r#"{"command": "ANALYZE", "params": {"source": "int fact(int n){ if(n<=1) return 1; return n*fact(n-1); }"}}"#,
    );
    assert_eq!(analyzed["status"], "success");
    assert_eq!(analyzed["data"]["callStack"].as_array().unwrap().len(), 1);
    assert_eq!(analyzed["data"]["returns"][1]["value"], "n*fact(n-1)");

    // Input acquisition failure is reported, connection stays usable.
    let missing = send(
        &mut stream,
        &mut reader,
        r#"{"command": "ANALYZE", "params": {"path": "/invalid/path/test.cpp"}}"#,
    );
    assert_eq!(missing["status"], "error");
    assert!(missing["message"].as_str().unwrap().contains("Failed to read code file"));

    let garbage = send(&mut stream, &mut reader, "not json");
    assert_eq!(garbage["status"], "error");
    assert!(garbage["message"].as_str().unwrap().contains("Invalid JSON format"));

    let pong = send(&mut stream, &mut reader, r#"{"command": "PING"}"#);
    assert_eq!(pong["data"], "PONG");

    // SHUTDOWN exits the process, so it is not sent from inside the test harness.
}

#[test]
fn test_concurrent_connections_analyze_independently() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let _ = server::serve(listener, Arc::new(ServerState::default()));
    });

    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let mut stream = TcpStream::connect(addr).unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let req = serde_json::json!({
                    "command": "ANALYZE",
                    "params": {"source": format!("int v{} = {};", i, i)}
                });
                let resp = send(&mut stream, &mut reader, &req.to_string());
                assert_eq!(resp["data"]["variables"][0]["name"], format!("v{}", i));
                assert_eq!(resp["data"]["variables"][0]["value"], i);
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
