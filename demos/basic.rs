//! Walkthrough of the three ring strategies.

use consistent_ring::{Error, JumpHash, KetamaRing, RingHash};

fn main() -> Result<(), Error> {
    let mut ring = RingHash::new()?;
    let id = ring.add_server("1.1.1.1:1111")?;
    println!("ring hash:   {}", ring.get_server("test_key")?.name());
    ring.del_server(id)?;

    let mut ketama = KetamaRing::new()?;
    let id = ketama.add_server("2.2.2.2:2222")?;
    println!("ketama:      {}", ketama.get_server("test_key")?.name());
    ketama.del_server(id)?;

    // Jump hash tables are add-only; servers live until the table drops.
    let mut jump = JumpHash::new()?;
    jump.add_server("3.3.3.3:3333")?;
    let server = jump.get_server("test_key")?;
    println!(
        "jump hash:   {} (bucket {})",
        server.name(),
        server.shard_id().unwrap_or(0)
    );

    Ok(())
}
