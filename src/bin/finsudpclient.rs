//! Interactive FINS client.
//!
//! A small read-eval-print loop over [`fins_udp::UdpClient`]:
//!
//! ```text
//! >> r D w 100 5        read 5 words from DM 100
//! >> w D w 100 1,2,3    write words 1,2,3 at DM 100
//! >> set A 100 3        set bit AR 100.03
//! >> rc                 read the plc clock
//! ```

use std::io::{self, BufRead, Write};
use std::net::IpAddr;

use clap::Parser;

use fins_udp::{MemoryArea, UdpClient, UdpEndpoint};

#[derive(Parser)]
#[command(name = "finsudpclient", about = "Interactive Omron FINS/UDP client")]
struct Args {
    /// plc server ip
    #[arg(long, default_value = "127.0.0.1")]
    ip: IpAddr,
    /// plc server udp port
    #[arg(long, default_value_t = 9600)]
    port: u16,
    /// plc server network (0-255)
    #[arg(long, default_value_t = 0)]
    sn: u8,
    /// client network (0-255)
    #[arg(long, default_value_t = 0)]
    cn: u8,
    /// plc server node (0-255)
    #[arg(long, default_value_t = 0)]
    snd: u8,
    /// client node (0-255)
    #[arg(long, default_value_t = 0)]
    cnd: u8,
    /// plc server unit (0-255)
    #[arg(long, default_value_t = 0)]
    su: u8,
    /// client unit (0-255)
    #[arg(long, default_value_t = 0)]
    cu: u8,
    /// show fins udp packets (1 = on)
    #[arg(long, short = 'p', default_value_t = 1)]
    show_packet: u8,
}

const SUPPORT_MEMORY_TYPE: &str =
    "support memory type: D for DM Area, A for Auxiliary Area, H for Holding Area, W for Work Area";
const SUPPORT_DATA_TYPE: &str = "support data type: b for Bit, B for Byte, s for String, w for Word";
const READ_USAGE: &str = "read usage:  r <memory type> <data type> <address> <count>  example: r A w 100 1";
const WRITE_USAGE: &str = "write usage: w <memory type> <data type> <address> <values> example: w A w 100 1,2,3";
const SET_RESET_USAGE: &str = "set/reset usage: set/reset <memory type> <address> <offset>";
const SINGLE_CMD_USAGE: &str = "single cmd usage: `close` for close client conn; `rc` for read clock";

fn main() {
    let args = Args::parse();

    let local = UdpEndpoint::any(args.cn, args.cnd, args.cu);
    let remote = UdpEndpoint::new((args.ip, args.port).into(), args.sn, args.snd, args.su);
    let client = match UdpClient::new(local, remote) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("failed to create fins client: {e}");
            std::process::exit(1);
        }
    };
    client.set_show_packet(args.show_packet == 1);

    let stdin = io::stdin();
    loop {
        print!(">> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("failed to read input: {e}");
                break;
            }
        }
        let input: Vec<&str> = line.split_whitespace().collect();
        match input.as_slice() {
            [] => println!("empty input"),
            ["cancel" | "bye" | "quit" | "exit"] => break,
            words => exec(&client, words),
        }
    }
    client.close();
}

fn exec(client: &UdpClient, input: &[&str]) {
    match input[0] {
        "h" | "help" => help(),
        "close" => client.close(),
        "rc" => match client.read_clock() {
            Ok(t) => println!("read clock success: {}", t.format("%Y-%m-%d %H:%M:%S")),
            Err(e) => println!("read clock error: {e}"),
        },
        "set" | "reset" => handle_set_reset(client, input),
        "r" => handle_read(client, input),
        "w" => handle_write(client, input),
        other => {
            println!("invalid cmd: {other}");
            println!("{READ_USAGE}");
            println!("{WRITE_USAGE}");
            println!("{SINGLE_CMD_USAGE}");
        }
    }
}

fn help() {
    println!("{SUPPORT_MEMORY_TYPE}");
    println!("{SUPPORT_DATA_TYPE}");
    println!("{READ_USAGE}");
    println!("{WRITE_USAGE}");
    println!("{SET_RESET_USAGE}");
    println!("{SINGLE_CMD_USAGE}");
}

fn handle_read(client: &UdpClient, input: &[&str]) {
    let Some((area, dt, addr, count)) = parse_read(input) else {
        return;
    };
    let outcome = match dt {
        "b" => client
            .read_bits(area, addr, 0, count)
            .map(|v| format!("{v:?}")),
        "B" => client
            .read_bytes(area, addr, count)
            .map(|v| format!("{v:?}")),
        "s" => client.read_string(area, addr, count),
        "w" => client
            .read_words(area, addr, count)
            .map(|v| format!("{v:?}")),
        _ => unreachable!("data type validated by parse_read"),
    };
    match outcome {
        Ok(result) => println!("read success: {result}"),
        Err(e) => println!("read error: {e}"),
    }
}

fn handle_write(client: &UdpClient, input: &[&str]) {
    if input.len() < 5 {
        println!("invalid write input");
        println!("{WRITE_USAGE}");
        return;
    }
    let Some(area) = memory_area(input[1], input[2]) else {
        return;
    };
    let Some(addr) = parse_address(input[3]) else {
        return;
    };
    // Values after the address may contain stray spaces; rejoin them.
    let values = input[4..].join(",");

    let outcome = match input[2] {
        "b" => parse_bools(&values).and_then(|v| {
            client
                .write_bits(area, addr, 0, &v)
                .map_err(|e| e.to_string())
        }),
        "B" => parse_bytes(&values).and_then(|v| {
            client
                .write_bytes(area, addr, &v)
                .map_err(|e| e.to_string())
        }),
        "s" => client
            .write_string(area, addr, &values)
            .map_err(|e| e.to_string()),
        "w" => parse_words(&values).and_then(|v| {
            client
                .write_words(area, addr, &v)
                .map_err(|e| e.to_string())
        }),
        _ => unreachable!("data type validated by memory_area"),
    };
    match outcome {
        Ok(()) => println!("write success"),
        Err(e) => println!("write error: {e}"),
    }
}

fn handle_set_reset(client: &UdpClient, input: &[&str]) {
    if input.len() != 4 {
        println!("invalid set/reset input");
        println!("{SET_RESET_USAGE}");
        return;
    }
    let Some(area) = memory_area(input[1], "b") else {
        return;
    };
    let Some(addr) = parse_address(input[2]) else {
        return;
    };
    let Ok(offset) = input[3].parse::<u8>() else {
        println!("invalid offset: {}", input[3]);
        return;
    };
    let outcome = if input[0] == "set" {
        client.set_bit(area, addr, offset)
    } else {
        client.reset_bit(area, addr, offset)
    };
    match outcome {
        Ok(()) => println!("{} success", input[0]),
        Err(e) => println!("{} error: {e}", input[0]),
    }
}

fn parse_read(input: &[&str]) -> Option<(MemoryArea, &'static str, u16, u16)> {
    if input.len() != 5 {
        println!("invalid read cmd");
        println!("{READ_USAGE}");
        return None;
    }
    let dt = match input[2] {
        "b" => "b",
        "B" => "B",
        "s" => "s",
        "w" => "w",
        other => {
            println!("{SUPPORT_DATA_TYPE}, your input: {other}");
            return None;
        }
    };
    let area = memory_area(input[1], dt)?;
    let addr = parse_address(input[3])?;
    let Ok(count) = input[4].parse::<u16>() else {
        println!("invalid count: {}", input[4]);
        return None;
    };
    Some((area, dt, addr, count))
}

fn memory_area(mt: &str, dt: &str) -> Option<MemoryArea> {
    let bit = dt == "b";
    let area = match mt {
        "D" => {
            if bit {
                MemoryArea::DmBit
            } else {
                MemoryArea::DmWord
            }
        }
        "A" => {
            if bit {
                MemoryArea::ArBit
            } else {
                MemoryArea::ArWord
            }
        }
        "H" => {
            if bit {
                MemoryArea::HrBit
            } else {
                MemoryArea::HrWord
            }
        }
        "W" => {
            if bit {
                MemoryArea::WrBit
            } else {
                MemoryArea::WrWord
            }
        }
        other => {
            println!("{SUPPORT_MEMORY_TYPE}, your input: {other}");
            return None;
        }
    };
    Some(area)
}

fn parse_address(s: &str) -> Option<u16> {
    match s.parse::<u16>() {
        Ok(addr) => Some(addr),
        Err(_) => {
            println!("invalid address: {s}");
            None
        }
    }
}

fn parse_bools(s: &str) -> Result<Vec<bool>, String> {
    s.split(',')
        .map(|v| match v {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(format!("can not parse {s} to bools: {v}")),
        })
        .collect()
}

fn parse_bytes(s: &str) -> Result<Vec<u8>, String> {
    s.split(',')
        .map(|v| {
            v.parse::<u8>()
                .map_err(|_| format!("can not parse {s} to bytes: {v}"))
        })
        .collect()
}

fn parse_words(s: &str) -> Result<Vec<u16>, String> {
    s.split(',')
        .map(|v| {
            v.parse::<u16>()
                .map_err(|_| format!("can not parse {s} to words: {v}"))
        })
        .collect()
}
