//! Character Device Configuration - major number registration
//!
//! Plays the role of `register_chrdev`/`unregister_chrdev`: a table of
//! majors in use and the name each was registered under.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use spin::Mutex;

use crate::error::{Result, SlotError};

// ============================================================================
// Character Device Table
// ============================================================================

/// Registered character device majors
#[derive(Debug, Default)]
pub struct CharDevTable {
    majors: Mutex<BTreeMap<u32, &'static str>>,
}

impl CharDevTable {
    pub fn new() -> Self {
        Self {
            majors: Mutex::new(BTreeMap::new()),
        }
    }

    /// Claim `major` for `name`
    pub fn register(&self, major: u32, name: &'static str) -> Result<()> {
        let mut majors = self.majors.lock();
        if majors.contains_key(&major) {
            return Err(SlotError::Busy(major));
        }
        majors.insert(major, name);
        Ok(())
    }

    /// Release `major`; returns false if it was not registered
    pub fn unregister(&self, major: u32) -> bool {
        self.majors.lock().remove(&major).is_some()
    }

    /// Name registered for `major`
    pub fn lookup(&self, major: u32) -> Option<&'static str> {
        self.majors.lock().get(&major).copied()
    }

    /// List all registered majors
    pub fn list(&self) -> Vec<(u32, &'static str)> {
        self.majors
            .lock()
            .iter()
            .map(|(major, name)| (*major, *name))
            .collect()
    }
}

// ============================================================================
// Registration
// ============================================================================

/// A registered major, released when dropped
#[derive(Debug)]
pub struct Registration {
    table: Arc<CharDevTable>,
    major: u32,
    name: &'static str,
}

impl Registration {
    pub fn register(table: &Arc<CharDevTable>, major: u32, name: &'static str) -> Result<Self> {
        table.register(major, name)?;
        Ok(Self {
            table: Arc::clone(table),
            major,
            name,
        })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.table.unregister(self.major);
    }
}
