use std::io::Write;
use std::os::unix::net::UnixStream;
use std::process;

use loadviz::control::{COMMANDS, ControlCommand, socket_path};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        usage();
        process::exit(1);
    }

    let cmd = args.join(" ");
    if ControlCommand::parse(&cmd).is_none() {
        eprintln!("unknown command: {cmd}");
        usage();
        process::exit(1);
    }

    let path = socket_path();
    let mut stream = match UnixStream::connect(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("loadviz not running ({path:?}): {e}");
            process::exit(1);
        }
    };

    if let Err(e) = writeln!(stream, "{cmd}") {
        eprintln!("failed to send command: {e}");
        process::exit(1);
    }
}

fn usage() {
    eprintln!("usage: loadviz-ctl <command>");
    eprintln!();
    eprintln!("commands:");
    for (name, help) in COMMANDS {
        eprintln!("  {name:<8}{help}");
    }
}
