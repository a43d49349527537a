use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use dmg_core::cartridge::header::Model;
use dmg_core::cartridge::Cartridge;
use dmg_core::console::Console;
use dmg_core::cpu::{cb_mnemonic, mnemonic};

#[derive(Debug)]
enum Command {
    Run(RunArgs),
    Resume(ResumeArgs),
    Info(PathBuf),
    SelfTest(SelfTestArgs),
}

#[derive(Debug)]
struct RunArgs {
    rom_path: PathBuf,
    limits: Limits,
    force_dmg: bool,
    verbose: bool,
    trace_cpu: bool,
    save_state: Option<PathBuf>,
}

#[derive(Debug)]
struct ResumeArgs {
    state_path: PathBuf,
    limits: Limits,
    verbose: bool,
    trace_cpu: bool,
    save_state: Option<PathBuf>,
}

#[derive(Debug)]
struct SelfTestArgs {
    max_cycles: u64,
}

#[derive(Debug)]
struct Limits {
    max_frames: Option<u64>,
    max_cycles: Option<u64>,
}

impl Limits {
    /// One emulated second when neither limit is given.
    fn or_default(self) -> Limits {
        if self.max_frames.is_none() && self.max_cycles.is_none() {
            Limits {
                max_frames: Some(60),
                max_cycles: None,
            }
        } else {
            self
        }
    }
}

fn print_usage() {
    eprintln!(
        "Usage:\n\
  dmg-cli <rom.gb> [--frames N] [--cycles N] [--dmg] [-v|--verbose]\n\
        [--trace-cpu] [--save-state FILE]\n\
  dmg-cli run <rom.gb> [options as above]\n\
  dmg-cli resume <state-file> [--frames N] [--cycles N] [-v|--verbose]\n\
        [--trace-cpu] [--save-state FILE]\n\
  dmg-cli info <rom.gb>\n\
  dmg-cli self-test [--cycles N]\n\
\n\
Commands:\n\
  run        Run a single ROM (default if no subcommand is given).\n\
  resume     Continue from a state file written with --save-state.\n\
  info       Parse a ROM header and print what it declares.\n\
  self-test  Run a tiny built-in program and verify the CPU results.\n\
\n\
Options:\n\
  --frames N        Stop after N frames (default 60 if no limit is given).\n\
  --cycles N        Stop after N clock cycles.\n\
  --dmg             Force the base hardware profile for a color-flagged ROM.\n\
  -v, --verbose     Print ROM metadata + run summary (stderr).\n\
  --trace-cpu       Print per-instruction CPU trace (stderr).\n\
  --save-state FILE Write the machine state to FILE when the run stops.\n\
\n\
Unmapped opcodes are reported to stderr as they are fetched; the run\n\
continues past them.\n"
    );
}

fn parse_args() -> Result<Command, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        return Err("missing args".to_string());
    }

    match args[0].as_str() {
        "-h" | "--help" => {
            print_usage();
            std::process::exit(0);
        }
        "run" => parse_run_args(&args[1..]).map(Command::Run),
        "resume" => parse_resume_args(&args[1..]).map(Command::Resume),
        "info" => match args.get(1) {
            Some(p) if args.len() == 2 => Ok(Command::Info(PathBuf::from(p))),
            Some(_) => Err("info takes exactly one ROM path".to_string()),
            None => Err("info requires a ROM path".to_string()),
        },
        "self-test" => parse_self_test_args(&args[1..]).map(Command::SelfTest),
        _ => parse_run_args(&args).map(Command::Run),
    }
}

fn parse_limit(
    it: &mut std::slice::Iter<'_, String>,
    flag: &str,
) -> Result<u64, String> {
    let v = it.next().ok_or_else(|| format!("{flag} requires a value"))?;
    v.parse::<u64>()
        .map_err(|_| format!("invalid {flag} value: {v}"))
}

fn parse_run_args(args: &[String]) -> Result<RunArgs, String> {
    if args.is_empty() {
        return Err("missing ROM path".to_string());
    }

    let mut it = args.iter();
    let rom_path = PathBuf::from(it.next().ok_or("missing ROM path")?);

    let mut max_frames: Option<u64> = None;
    let mut max_cycles: Option<u64> = None;
    let mut force_dmg = false;
    let mut verbose = false;
    let mut trace_cpu = false;
    let mut save_state: Option<PathBuf> = None;

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "--dmg" => force_dmg = true,
            "-v" | "--verbose" => verbose = true,
            "--trace-cpu" => trace_cpu = true,
            "--frames" => max_frames = Some(parse_limit(&mut it, "--frames")?),
            "--cycles" => max_cycles = Some(parse_limit(&mut it, "--cycles")?),
            "--save-state" => {
                let v = it
                    .next()
                    .ok_or_else(|| "--save-state requires a value".to_string())?;
                save_state = Some(PathBuf::from(v));
            }
            _ if arg.starts_with('-') => return Err(format!("unknown flag: {arg}")),
            _ => return Err(format!("unexpected extra positional arg: {arg}")),
        }
    }

    Ok(RunArgs {
        rom_path,
        limits: Limits {
            max_frames,
            max_cycles,
        },
        force_dmg,
        verbose,
        trace_cpu,
        save_state,
    })
}

fn parse_resume_args(args: &[String]) -> Result<ResumeArgs, String> {
    if args.is_empty() {
        return Err("missing state file path".to_string());
    }

    let mut it = args.iter();
    let state_path = PathBuf::from(it.next().ok_or("missing state file path")?);

    let mut max_frames: Option<u64> = None;
    let mut max_cycles: Option<u64> = None;
    let mut verbose = false;
    let mut trace_cpu = false;
    let mut save_state: Option<PathBuf> = None;

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "-v" | "--verbose" => verbose = true,
            "--trace-cpu" => trace_cpu = true,
            "--frames" => max_frames = Some(parse_limit(&mut it, "--frames")?),
            "--cycles" => max_cycles = Some(parse_limit(&mut it, "--cycles")?),
            "--save-state" => {
                let v = it
                    .next()
                    .ok_or_else(|| "--save-state requires a value".to_string())?;
                save_state = Some(PathBuf::from(v));
            }
            _ if arg.starts_with('-') => return Err(format!("unknown flag: {arg}")),
            _ => return Err(format!("unexpected extra positional arg: {arg}")),
        }
    }

    Ok(ResumeArgs {
        state_path,
        limits: Limits {
            max_frames,
            max_cycles,
        },
        verbose,
        trace_cpu,
        save_state,
    })
}

fn parse_self_test_args(args: &[String]) -> Result<SelfTestArgs, String> {
    let mut max_cycles: u64 = 10_000;

    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "--cycles" => max_cycles = parse_limit(&mut it, "--cycles")?,
            _ if arg.starts_with('-') => return Err(format!("unknown flag: {arg}")),
            _ => return Err(format!("unexpected positional arg: {arg}")),
        }
    }

    Ok(SelfTestArgs { max_cycles })
}

/// Wires the unknown-opcode observer to stderr and returns the report
/// counter it increments.
fn install_unknown_opcode_reporter(console: &mut Console) -> Rc<Cell<u64>> {
    let count = Rc::new(Cell::new(0u64));
    let hook_count = Rc::clone(&count);
    console.cpu.set_unknown_opcode_hook(move |opcode, pc| {
        hook_count.set(hook_count.get() + 1);
        eprintln!("unknown opcode 0x{opcode:02X} at 0x{pc:04X}");
    });
    count
}

fn trace_instruction(console: &Console, cycles: u64) {
    let r = &console.cpu.regs;
    let pc = r.pc;
    let b0 = console.bus.read8(pc);
    let b1 = console.bus.read8(pc.wrapping_add(1));
    let b2 = console.bus.read8(pc.wrapping_add(2));
    let name = if b0 == 0xCB { cb_mnemonic(b1) } else { mnemonic(b0) };
    eprintln!(
        "CYC={cycles:010} PC={pc:04X} OP={b0:02X} {b1:02X} {b2:02X} {name:<11} \
         AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} IME={}",
        r.af(),
        r.bc(),
        r.de(),
        r.hl(),
        r.sp,
        console.cpu.ime,
    );
}

/// Drives the console until a limit is hit and returns (frames, cycles).
fn drive(console: &mut Console, limits: &Limits, trace_cpu: bool) -> (u64, u64) {
    let mut frames: u64 = 0;
    let mut cycles: u64 = 0;

    if trace_cpu || limits.max_cycles.is_some() {
        // Single-step so the cycle limit lands on an instruction boundary
        // rather than a frame boundary. Draining through frame_elapsed
        // keeps the console's counter bounded, so a state saved from this
        // path resumes cleanly.
        loop {
            if limits.max_frames.is_some_and(|m| frames >= m)
                || limits.max_cycles.is_some_and(|m| cycles >= m)
            {
                return (frames, cycles);
            }
            if trace_cpu {
                trace_instruction(console, cycles);
            }
            cycles += u64::from(console.step());
            if console.frame_elapsed() {
                frames += 1;
            }
        }
    }

    loop {
        if limits.max_frames.is_some_and(|m| frames >= m) {
            return (frames, cycles);
        }
        cycles += u64::from(console.run_frame());
        frames += 1;
    }
}

fn write_state(console: &Console, path: &PathBuf) -> Result<(), String> {
    let bytes = bincode::serialize(console)
        .map_err(|e| format!("failed to serialize state: {e}"))?;
    std::fs::write(path, bytes)
        .map_err(|e| format!("failed to write state {}: {e}", path.display()))
}

fn read_state(path: &PathBuf) -> Result<Console, String> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("failed to read state {}: {e}", path.display()))?;
    bincode::deserialize(&bytes)
        .map_err(|e| format!("invalid state file {}: {e}", path.display()))
}

fn load_cartridge(path: &PathBuf) -> Result<Cartridge, String> {
    let rom = std::fs::read(path)
        .map_err(|e| format!("failed to read ROM {}: {e}", path.display()))?;
    Cartridge::from_rom(rom).map_err(|e| format!("invalid ROM: {e:?}"))
}

fn run_single(args: RunArgs) -> Result<i32, String> {
    let cart = load_cartridge(&args.rom_path)?;

    if args.verbose {
        eprintln!(
            "Loaded ROM: {} ({:?}, {:?}, {:?}, {:?})",
            args.rom_path.display(),
            cart.header.model,
            cart.header.cartridge_type,
            cart.header.rom_size,
            cart.header.ram_size
        );
    }

    let mut console = if args.force_dmg {
        Console::with_model(cart, Model::Dmg)
    } else {
        Console::new(cart)
    }
    .map_err(|e| format!("failed to set up console: {e:?}"))?;

    let unknown = install_unknown_opcode_reporter(&mut console);

    let limits = args.limits.or_default();
    let (frames, cycles) = drive(&mut console, &limits, args.trace_cpu);

    if args.verbose {
        eprintln!(
            "Done: frames={frames} cycles={cycles} unknown_opcodes={}",
            unknown.get()
        );
    }

    if let Some(path) = &args.save_state {
        write_state(&console, path)?;
        if args.verbose {
            eprintln!("State written to {}", path.display());
        }
    }

    Ok(0)
}

fn run_resume(args: ResumeArgs) -> Result<i32, String> {
    let mut console = read_state(&args.state_path)?;

    if args.verbose {
        eprintln!(
            "Resumed state: {} ({:?}, PC={:04X})",
            args.state_path.display(),
            console.model(),
            console.cpu.regs.pc
        );
    }

    // The observer is not part of the serialized state; rewire it.
    let unknown = install_unknown_opcode_reporter(&mut console);

    let limits = args.limits.or_default();
    let (frames, cycles) = drive(&mut console, &limits, args.trace_cpu);

    if args.verbose {
        eprintln!(
            "Done: frames={frames} cycles={cycles} unknown_opcodes={}",
            unknown.get()
        );
    }

    if let Some(path) = &args.save_state {
        write_state(&console, path)?;
        if args.verbose {
            eprintln!("State written to {}", path.display());
        }
    }

    Ok(0)
}

fn run_info(path: PathBuf) -> Result<i32, String> {
    let cart = load_cartridge(&path)?;
    let h = &cart.header;
    println!("{}", path.display());
    println!("  model:     {:?}", h.model);
    println!("  type:      {:?}", h.cartridge_type);
    println!("  rom size:  {:?} ({} bytes)", h.rom_size, h.rom_size.byte_len());
    println!("  ram size:  {:?}", h.ram_size);
    Ok(0)
}

fn make_self_test_rom() -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];

    // Computes 0x15 + 0x27 with BCD adjust, stashes the result in B and
    // WRAM, then spins.
    let program: &[u8] = &[
        0x3E, 0x15, // LD A,0x15
        0xC6, 0x27, // ADD A,0x27
        0x27, // DAA            ; A = 0x42
        0x47, // LD B,A
        0x21, 0x00, 0xC0, // LD HL,0xC000
        0x77, // LD (HL),A
        0x0E, 0x99, // LD C,0x99
        0x18, 0xFE, // JR -2
    ];
    rom[0x0100..0x0100 + program.len()].copy_from_slice(program);

    // Minimal header bytes needed by Cartridge::from_rom.
    rom[0x0147] = 0x00; // ROM only
    rom[0x0148] = 0x00; // 32KiB
    rom[0x0149] = 0x00; // no RAM

    rom
}

fn run_self_test(args: SelfTestArgs) -> Result<i32, String> {
    let cart =
        Cartridge::from_rom(make_self_test_rom()).map_err(|e| format!("invalid ROM: {e:?}"))?;
    let mut console =
        Console::new(cart).map_err(|e| format!("failed to set up console: {e:?}"))?;

    let unknown = install_unknown_opcode_reporter(&mut console);

    let mut cycles: u64 = 0;
    while cycles < args.max_cycles {
        cycles += u64::from(console.step());
    }

    let ok = console.cpu.regs.b() == 0x42
        && console.cpu.regs.c() == 0x99
        && console.bus.read8(0xC000) == 0x42
        && unknown.get() == 0;

    if ok {
        println!("PASS self-test (cycles={cycles})");
        Ok(0)
    } else {
        println!(
            "FAIL self-test (cycles={cycles} B={:02X} C={:02X} mem={:02X} unknown={})",
            console.cpu.regs.b(),
            console.cpu.regs.c(),
            console.bus.read8(0xC000),
            unknown.get()
        );
        Ok(1)
    }
}

fn run() -> Result<i32, String> {
    let cmd = parse_args()?;
    match cmd {
        Command::Run(a) => run_single(a),
        Command::Resume(a) => run_resume(a),
        Command::Info(p) => run_info(p),
        Command::SelfTest(a) => run_self_test(a),
    }
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            std::process::exit(1);
        }
    }
}
