//! Print sinks for the `print_stmt` intrinsic.
//!
//! The interpreter never writes to a stream directly. Every print goes
//! through a [`SharedPrintHandler`] supplied by the host, one call per
//! executed print statement, in execution order.

use parking_lot::Mutex;

/// Host callback receiving each printed string.
pub type PrintCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Print handler implementation using enum dispatch.
pub enum PrintHandlerImpl {
    /// Writes each string to stdout followed by a newline.
    Stdout,
    /// Captures to a buffer, one line per print (testing).
    Buffer(Mutex<String>),
    /// Discards all output.
    Silent,
    /// Forwards each string to a host function.
    Callback(PrintCallback),
}

impl PrintHandlerImpl {
    /// Deliver one printed string.
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout => println!("{msg}"),
            Self::Buffer(buf) => {
                let mut buf = buf.lock();
                buf.push_str(msg);
                buf.push('\n');
            }
            Self::Silent => {}
            Self::Callback(callback) => callback(msg),
        }
    }

    /// Get all captured output.
    ///
    /// Returns empty string for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(buf) => buf.lock().clone(),
            Self::Stdout | Self::Silent | Self::Callback(_) => String::new(),
        }
    }

    /// Clear captured output.
    pub fn clear(&self) {
        if let Self::Buffer(buf) = self {
            buf.lock().clear();
        }
    }
}

/// Shared print handler that can be passed around.
pub type SharedPrintHandler = std::sync::Arc<PrintHandlerImpl>;

/// Create a stdout print handler.
pub fn stdout_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Stdout)
}

/// Create a buffer print handler for capturing output.
pub fn buffer_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Buffer(Mutex::new(String::new())))
}

/// Create a silent print handler that discards all output.
pub fn silent_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Silent)
}

/// Create a print handler that forwards every string to `callback`.
pub fn callback_handler(callback: impl Fn(&str) + Send + Sync + 'static) -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Callback(Box::new(callback)))
}
