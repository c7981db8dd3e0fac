//! Example: Using portable advisory file locks
//!
//! Run with: `cargo run --example file_lock`
//!
//! Start it twice at once to watch the second copy wait for the first.

use lockapi::*;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Open (and create if needed) the file to lock
    let path = std::env::temp_dir().join("lockapi-demo").join("example-resource.lock");
    let file = LockFileOptions::new().create_parent_dirs(true).open(&path)?;
    println!("Opened {} (backend: {})", path.display(), NativeBackend::NAME);

    // Try to acquire the lock
    match try_lock_file(&file) {
        Ok(()) => {
            println!("Lock acquired successfully!");

            // Do some work while holding the lock
            thread::sleep(Duration::from_secs(2));
            println!("Work completed");

            // Release the lock
            unlock_file(&file)?;
            println!("Lock released");
        }
        Err(LockError::WouldBlock) => {
            println!("Lock is currently held by another handle");
        }
        Err(e) => return Err(e.into()),
    }

    // Block until the lock is ours
    println!("\nWaiting for the lock...");
    let guard = FileLockGuard::acquire(&file)?;
    println!("Lock acquired!");

    thread::sleep(Duration::from_secs(2));

    // Lock is automatically released when the guard is dropped
    drop(guard);
    println!("Lock released (via drop)");

    Ok(())
}
