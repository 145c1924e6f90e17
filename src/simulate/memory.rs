//! Unbounded memory growth.
//!
//! Each step allocates one chunk, fills every byte with a non-zero value so
//! the pages are actually committed, and keeps it forever.

use std::hint::black_box;
use std::io;
use std::thread;

const MIB: usize = 1024 * 1024;

/// Byte written across every chunk.
pub const FILL_BYTE: u8 = 0xA5;

/// Ever-growing set of retained chunks. Owned by a single thread.
#[derive(Debug)]
pub struct MemoryGrowth {
    chunk_bytes: usize,
    chunks: Vec<Vec<u8>>,
}

impl MemoryGrowth {
    pub fn new(chunk_bytes: usize) -> Self {
        Self {
            chunk_bytes,
            chunks: Vec::new(),
        }
    }

    /// Allocate and retain one more chunk. Returns the total retained bytes.
    pub fn grow(&mut self) -> usize {
        let chunk = vec![FILL_BYTE; self.chunk_bytes];
        self.chunks.push(black_box(chunk));
        self.retained_bytes()
    }

    pub fn retained_bytes(&self) -> usize {
        self.chunks.len() * self.chunk_bytes
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    #[cfg(test)]
    fn chunks(&self) -> &[Vec<u8>] {
        &self.chunks
    }
}

/// Start the growth loop on a detached thread.
///
/// With no `chunk_limit` the thread never exits; it runs until the process
/// is killed, typically by the OOM killer. With a limit it stops allocating
/// after that many chunks and parks, still holding them. Only thread creation
/// can fail.
pub fn spawn_memory_growth(chunk_bytes: usize, chunk_limit: Option<usize>) -> io::Result<()> {
    thread::Builder::new()
        .name("memory-growth".into())
        .spawn(move || {
            let mut growth = MemoryGrowth::new(chunk_bytes);
            tracing::warn!(
                chunk_mb = chunk_bytes / MIB,
                chunk_limit,
                "Memory growth started"
            );
            grow_until(&mut growth, chunk_limit);

            tracing::warn!(
                chunks = growth.chunk_count(),
                total_mb = growth.retained_bytes() / MIB,
                "Memory growth limit reached, holding allocation"
            );
            loop {
                thread::park();
            }
        })?;
    Ok(())
}

/// Grow one chunk at a time until `chunk_limit` chunks are held, or forever.
fn grow_until(growth: &mut MemoryGrowth, chunk_limit: Option<usize>) {
    while chunk_limit.map_or(true, |limit| growth.chunk_count() < limit) {
        let total = growth.grow();
        tracing::info!(
            chunks = growth.chunk_count(),
            total_mb = total / MIB,
            "Allocated memory chunk"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_retains_every_chunk() {
        let mut growth = MemoryGrowth::new(4096);
        assert_eq!(growth.retained_bytes(), 0);

        assert_eq!(growth.grow(), 4096);
        assert_eq!(growth.grow(), 8192);
        assert_eq!(growth.grow(), 12288);
        assert_eq!(growth.chunk_count(), 3);
    }

    #[test]
    fn chunks_are_fully_written() {
        let mut growth = MemoryGrowth::new(64 * 1024);
        growth.grow();
        growth.grow();

        for chunk in growth.chunks() {
            assert_eq!(chunk.len(), 64 * 1024);
            assert!(chunk.iter().all(|&b| b == FILL_BYTE));
        }
    }

    #[test]
    fn grow_until_stops_at_limit() {
        let mut growth = MemoryGrowth::new(1024);
        grow_until(&mut growth, Some(5));
        assert_eq!(growth.chunk_count(), 5);
        assert_eq!(growth.retained_bytes(), 5 * 1024);

        grow_until(&mut growth, Some(5));
        assert_eq!(growth.chunk_count(), 5);
    }

    #[test]
    fn spawned_growth_holds_its_chunks() {
        let before = crate::observability::alloc::total_allocated_bytes();
        spawn_memory_growth(MIB, Some(3)).unwrap();

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            let grown = crate::observability::alloc::total_allocated_bytes() - before;
            if grown >= (3 * MIB) as u64 {
                break;
            }
            assert!(
                std::time::Instant::now() < deadline,
                "only {grown} bytes allocated"
            );
            thread::sleep(std::time::Duration::from_millis(10));
        }
    }

    #[test]
    fn growth_shows_up_in_allocation_counters() {
        let before = crate::observability::alloc::total_allocated_bytes();
        let mut growth = MemoryGrowth::new(2 * MIB);
        growth.grow();
        let after = crate::observability::alloc::total_allocated_bytes();
        assert!(after >= before + (2 * MIB) as u64);
    }
}
