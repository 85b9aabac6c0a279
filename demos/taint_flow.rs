//! Taint propagation through a loop, using the set domain.
//!
//! Analyzes a toy program with one variable `x`:
//!
//! ```text
//! entry:  x = user_input()
//! head:   while cond:
//! body:       x = x + escalate(x)
//! exit:   sink(sanitize(x))
//! ```
//!
//! The loop head is iterated with widening until it stops growing, then the
//! state reaching the sink is split by whether an attacker controls it.
//!
//! Run with: `cargo run --example taint_flow`
//! With options: `cargo run --example taint_flow -- --max-iterations 2 --log-level debug`

use std::fmt;

use clap::Parser;

use abstract_domains::ops::{By, Filter, Map, Partition, Transform};
use abstract_domains::{AbstractDomain, SetDomain};

#[derive(Parser, Debug)]
#[command(name = "taint_flow")]
#[command(about = "Propagate taint through a loop with a set domain")]
struct Args {
    /// Give up after this many loop iterations
    #[arg(short, long, default_value_t = 10)]
    max_iterations: usize,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: simplelog::LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Taint {
    UserInput,
    Cookie,
    Header,
    Secret,
}

impl Taint {
    fn escalate(&self) -> Taint {
        match self {
            Taint::UserInput => Taint::Cookie,
            Taint::Cookie => Taint::Header,
            Taint::Header | Taint::Secret => Taint::Secret,
        }
    }

    fn attacker_controlled(&self) -> bool {
        matches!(self, Taint::UserInput | Taint::Cookie | Taint::Header)
    }
}

impl fmt::Display for Taint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl abstract_domains::Element for Taint {
    const NAME: &'static str = "Taint";
}

type Taints = SetDomain<Taint>;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    simplelog::TermLogger::init(
        args.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    println!("─── Taint Flow ───\n");
    println!("Domain: {}", Taints::structure());
    for part in Taints::parts() {
        println!("  part {:<8} -> {}", part.name(), Taints::part_name(part));
    }
    println!();

    // ────────────────────────────────────────────────────────────────────────
    // FIXPOINT
    // ────────────────────────────────────────────────────────────────────────

    let entry = Taints::singleton(Taint::UserInput);
    let body = |x: &Taints| x.join(&x.transform(Taints::ELEMENT, Map(Taint::escalate)));

    let mut head = Taints::bottom();
    let mut converged = false;
    for iteration in 0..args.max_iterations {
        let next = entry.join(&body(&head));
        log::info!("iteration {}: head = {}, next = {}", iteration, head, next);
        if next.less_or_equal(&head) {
            converged = true;
            break;
        }
        head = head.widen(iteration, &next);
    }

    if !converged {
        println!("Warning: no fixpoint after {} iterations\n", args.max_iterations);
    }
    println!("Loop head: {}", head);

    // ────────────────────────────────────────────────────────────────────────
    // SINK
    // ────────────────────────────────────────────────────────────────────────

    let sanitized = head.transform(Taints::ELEMENT, Filter(|t: &Taint| *t != Taint::Header));
    println!("At sink:   {}", sanitized);

    let removed = sanitized.subtract(&head);
    println!("Sanitized: {}", removed);

    let split = sanitized.partition(Taints::ELEMENT, By(Taint::attacker_controlled));
    for (controlled, taints) in &split {
        let label = if *controlled { "attacker-controlled" } else { "internal" };
        println!("  {:<20} {}", label, taints);
    }

    if sanitized.exists(Taints::ELEMENT, |t: &Taint| *t == Taint::Secret) {
        println!("\nIssue: secret data reaches the sink");
    }

    Ok(())
}
