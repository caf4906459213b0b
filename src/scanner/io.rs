// src/scanner/io.rs
use std::{
    io::{BufWriter, Write},
    path::Path,
    time::Instant,
};

use log::debug;
use serde::{Deserialize, Serialize};

use super::states::{State, StateTable};

// -------------------- JSON (de)serialization --------------------

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct StatesDisk {
    version: u32,
    states: Vec<State>,
}

impl From<&StateTable> for StatesDisk {
    fn from(t: &StateTable) -> Self {
        Self {
            version: FORMAT_VERSION,
            states: t.states().to_vec(),
        }
    }
}

impl StatesDisk {
    fn into_table(self) -> Result<StateTable, String> {
        if self.version != FORMAT_VERSION {
            return Err(format!("unsupported states JSON version {}", self.version));
        }
        for (i, s) in self.states.iter().enumerate() {
            if s.row != i {
                return Err(format!("state {} has row {}, expected {i}", s.name, s.row));
            }
        }
        Ok(StateTable::from_states(self.states))
    }
}

pub fn states_to_json(t: &StateTable) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&StatesDisk::from(t))
}

pub fn save_states_json(path: &Path, t: &StateTable) -> std::io::Result<()> {
    let instant = Instant::now();
    let f = std::fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer(&mut w, &StatesDisk::from(t))?;
    w.flush()?;
    debug!(
        "[io] saved {} states to {} in {} ms",
        t.len(),
        path.display(),
        instant.elapsed().as_millis()
    );
    Ok(())
}

pub fn load_states_json_bytes(data: &[u8]) -> Result<StateTable, String> {
    serde_json::from_slice::<StatesDisk>(data)
        .map_err(|e| format!("Failed to parse states JSON: {e}"))?
        .into_table()
}
