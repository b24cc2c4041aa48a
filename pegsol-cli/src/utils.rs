use pegsol_common::jump::format_jumps;
use pegsol_solver::{Outcome, SolveReport};

use std::io::{IsTerminal, Write, stderr};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Prints the outcome of one solve and returns the process exit code:
/// 0 solved, 2 no solution, 3 budget exhausted.
pub fn print_report(report: &SolveReport) -> i32 {
    let elapsed = format_elapsed(report.elapsed);
    let expanded = report.expanded;
    match &report.outcome {
        Outcome::Solved(solution) => {
            println!(
                "✓ Solved in {} Moves — Time: {elapsed}, Nodes: {expanded}\n",
                solution.moves
            );
            println!("{}", format_jumps(&solution.jumps()));
            println!("{}", solution.final_board().pretty_print());
            0
        }
        Outcome::Exhausted => {
            println!("✗ No solution exists from this position — Time: {elapsed}, Nodes: {expanded}");
            2
        }
        Outcome::OutOfBudget => {
            println!(
                "✗ Gave up after {expanded} expanded nodes; raise --max-nodes to search further — Time: {elapsed}"
            );
            3
        }
    }
}

pub fn print_run(run: u32, report: &SolveReport) {
    let status = match &report.outcome {
        Outcome::Solved(solution) => format!("{} moves", solution.moves),
        Outcome::Exhausted => "no solution".into(),
        Outcome::OutOfBudget => "out of budget".into(),
    };
    println!(
        "run {run:>3}: {} — {status}, {} nodes",
        format_elapsed(report.elapsed),
        report.expanded
    );
}

/// Summary line after a bench session: fastest, mean and slowest run.
pub fn print_bench(reports: &[SolveReport]) {
    if reports.is_empty() {
        return;
    }
    let min = reports.iter().map(|r| r.elapsed).min().unwrap_or_default();
    let max = reports.iter().map(|r| r.elapsed).max().unwrap_or_default();
    let total: Duration = reports.iter().map(|r| r.elapsed).sum();
    let mean = total / reports.len() as u32;
    println!(
        "\n{} runs — min {}, mean {}, max {}",
        reports.len(),
        format_elapsed(min),
        format_elapsed(mean),
        format_elapsed(max)
    );
}

pub fn with_spinner<T, F: FnOnce() -> T>(message: &str, f: F) -> T {
    if !stderr().is_terminal() {
        return f();
    }

    let spinning = Arc::new(AtomicBool::new(true));
    let spinning_clone = Arc::clone(&spinning);
    let message = message.to_string();

    let handle = std::thread::spawn(move || {
        let spinner_chars = ['|', '/', '-', '\\'];
        let mut i = 0;
        let stderr = stderr();
        let mut handle = stderr.lock();

        let _ = write!(handle, "\x1b[?25l"); // hide cursor
        let _ = handle.flush();

        while spinning_clone.load(Ordering::Relaxed) {
            let spinner_char = spinner_chars[i % spinner_chars.len()];
            let _ = write!(handle, "\r{spinner_char} {message}");
            let _ = handle.flush();
            std::thread::sleep(Duration::from_millis(100));
            i += 1;
        }

        let _ = write!(handle, "\r\x1b[2K\r\x1b[?25h"); // clear line and show cursor
        let _ = handle.flush();
    });

    let result = f();
    spinning.store(false, Ordering::Relaxed);
    let _ = handle.join();
    result
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 90 {
        let ms = elapsed.subsec_millis();
        format!("{secs}.{ms:03}s")
    } else {
        let minutes = secs / 60;
        let secs = secs % 60;
        format!("{minutes}m {secs}s")
    }
}
