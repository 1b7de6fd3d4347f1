//! Macros for error/warning printing

/// Expand to an error message
#[macro_export]
macro_rules! monwm_error {
    ($($err:tt)*) => ({
        use colored::Colorize;
        eprintln!("{}: {}", "[monwm error]".red().bold(), format!($($err)*));
    })
}

/// Expand to an info message
#[macro_export]
macro_rules! monwm_info {
    ($($err:tt)*) => ({
        use colored::Colorize;
        eprintln!("{}: {}", "[monwm info]".purple().bold(), format!($($err)*));
    })
}

/// Expand to a fatal message
#[macro_export]
macro_rules! monwm_fatal {
    ($($err:tt)*) => ({
        use colored::Colorize;
        eprintln!("{}: {}", "[monwm fatal]".yellow().bold(), format!($($err)*));
        std::process::exit(1);
    })
}
