use constitution::governance::OPERATOR_SAFE_ACTIONS;

fn banner() -> String {
    format!(
        "constitution {}\nResolution: member majority, or operator fast path ({} allowlisted actions)",
        env!("CARGO_PKG_VERSION"),
        OPERATOR_SAFE_ACTIONS.len()
    )
}

/// Display version information
pub fn execute() {
    println!("{}", banner());
}
