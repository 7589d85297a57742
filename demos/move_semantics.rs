//! Copy swap versus move swap, with lifecycle counters.
//!
//! Run with:
//!     cargo run --example move_semantics
//!
//! Environment:
//!     MOVEBUF_TRACE=1          print a line for every construct/copy/move/drop
//!     MOVEBUF_BULK_COUNT=N     also time N sized buffers pushed into a Vec
//!     MOVEBUF_BULK_LEN=L       element count of each bulk buffer (default 1000)

use log::LevelFilter;
use movebuf::{DemoConfig, OwningBuffer, run_bulk, stats};

fn describe(a: &OwningBuffer, b: &OwningBuffer) {
    println!("a: {}  b: {}", a, b);
    #[cfg(feature = "digest")]
    println!(
        "   contents a={} b={}",
        &a.digest().to_hex()[..16],
        &b.digest().to_hex()[..16]
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DemoConfig::from_env()?;

    let level = if config.trace() {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new().filter_level(level).init();

    let mut a = OwningBuffer::sized(2)?;
    let mut b = OwningBuffer::sized(5)?;
    describe(&a, &b);

    println!("\ncopy swap");
    #[cfg(feature = "digest")]
    let expected = (b.digest(), a.digest());
    let before = stats::snapshot();
    a.copy_swap(&mut b)?;
    describe(&a, &b);
    println!("   {}", stats::snapshot().since(&before));
    #[cfg(feature = "digest")]
    println!("   contents exchanged: {}", (a.digest(), b.digest()) == expected);

    println!("\nmove swap");
    #[cfg(feature = "digest")]
    let expected = (b.digest(), a.digest());
    let before = stats::snapshot();
    a.move_swap(&mut b);
    describe(&a, &b);
    println!("   {}", stats::snapshot().since(&before));
    #[cfg(feature = "digest")]
    println!("   contents exchanged: {}", (a.digest(), b.digest()) == expected);

    if let Some(bulk) = config.bulk() {
        println!(
            "\nbulk: {} buffers of {} elements ({} elements total)",
            bulk.count(),
            bulk.buffer_len(),
            bulk.total_elements()
        );
        let report = run_bulk(&bulk)?;
        println!("   {}", report);
    }

    println!("\ndropping a and b");
    drop(a);
    drop(b);
    println!("totals: {}", stats::snapshot());

    Ok(())
}
