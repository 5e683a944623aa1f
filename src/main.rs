//! Host-side helper: `cargo run` builds the wasm package into `static/pkg`
//! and serves the demo page on a local port.

use std::process::{Command, Stdio};
use std::{env, thread, time::Duration};

const DEFAULT_PORT: &str = "8000";

fn main() {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return;
    }

    println!("Building wasm package …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack build failed");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH; serving whatever is already in static/pkg.");
        }
    }

    let port = env::args().nth(1).unwrap_or_else(|| DEFAULT_PORT.to_owned());
    println!("Serving static/ at http://127.0.0.1:{port} …");
    let mut server = match Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            eprintln!("failed to start http server: {err}");
            std::process::exit(1);
        }
    };

    // Exit together with the server.
    loop {
        match server.try_wait() {
            Ok(Some(status)) => {
                eprintln!("http server exited: {status}");
                break;
            }
            Ok(None) => thread::sleep(Duration::from_secs(1)),
            Err(err) => {
                eprintln!("lost http server: {err}");
                break;
            }
        }
    }
}
