// Replays recorded detector output from a JSON Lines file, one
// `DetectionResult` per line, so the control loop runs without a camera

use crate::models::capture::CapturedFrame;
use crate::models::hand::{DetectionResult, PoseError, PoseResult};
use crate::platform::pose::hand_landmarker::HandLandmarker;
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::{Path, PathBuf};

pub struct ReplayHandLandmarker {
    source: PathBuf,
    pending: VecDeque<DetectionResult>,
    total: usize,
}

impl ReplayHandLandmarker {
    pub fn open(path: &Path) -> PoseResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            PoseError::ReplayFailed(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let mut replay = Self::from_reader(std::io::BufReader::new(file))?;
        replay.source = path.to_path_buf();
        Ok(replay)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> PoseResult<Self> {
        let mut pending = VecDeque::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| PoseError::ReplayFailed(e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let result: DetectionResult = serde_json::from_str(&line)
                .map_err(|e| PoseError::ReplayFailed(format!("line {}: {}", index + 1, e)))?;
            pending.push_back(result);
        }

        let total = pending.len();
        Ok(Self {
            source: PathBuf::from("<reader>"),
            pending,
            total,
        })
    }

    /// Recorded results not yet replayed
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

impl HandLandmarker for ReplayHandLandmarker {
    /// Returns the next recording; an exhausted recording reports no hands
    fn detect(&mut self, _frame: &CapturedFrame) -> PoseResult<DetectionResult> {
        Ok(self.pending.pop_front().unwrap_or_default())
    }

    fn is_initialized(&self) -> bool {
        true
    }

    fn model_info(&self) -> String {
        format!(
            "Replay of {} ({} of {} results left)",
            self.source.display(),
            self.pending.len(),
            self.total
        )
    }
}
