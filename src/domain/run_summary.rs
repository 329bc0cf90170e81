use crate::domain::models::{reduction_percent, ConversionOutcome};
use chrono::{DateTime, Local};
use std::time::Duration;

/// 1回の実行で得られた変換結果の集計。
///
/// 実行開始時に空で作られ、走査中に結果が追記され、最後に経過時間を記録して確定する。
/// 各リストは走査で出会った順に並ぶ。サイズの合計は成功したファイルだけを対象とする。
#[derive(Debug, Clone)]
pub struct RunSummary {
    started_at: DateTime<Local>,
    successes: Vec<ConversionOutcome>,
    skipped: Vec<ConversionOutcome>,
    failed: Vec<ConversionOutcome>,
    total_original_size: u64,
    total_new_size: u64,
    elapsed: Duration,
}

impl RunSummary {
    pub fn new(started_at: DateTime<Local>) -> Self {
        Self {
            started_at,
            successes: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
            total_original_size: 0,
            total_new_size: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// 結果を種類ごとのリストに振り分けて追記する。
    pub fn record(&mut self, outcome: ConversionOutcome) {
        match &outcome {
            ConversionOutcome::Success {
                original_size,
                new_size,
                ..
            } => {
                self.total_original_size += original_size;
                self.total_new_size += new_size;
                self.successes.push(outcome);
            }
            ConversionOutcome::Skipped { .. } => self.skipped.push(outcome),
            ConversionOutcome::Failed { .. } => self.failed.push(outcome),
        }
    }

    pub fn finish(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    // --- 集計値 ---

    /// 全体の削減率 (%)。
    pub fn total_reduction(&self) -> f64 {
        reduction_percent(self.total_original_size, self.total_new_size)
    }

    /// 削減できたバイト数。出力の方が大きければ負になる。
    pub fn saved_bytes(&self) -> i64 {
        self.total_original_size as i64 - self.total_new_size as i64
    }

    pub fn outcome_count(&self) -> usize {
        self.successes.len() + self.skipped.len() + self.failed.len()
    }

    // --- ゲッターメソッド ---

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }
    pub fn successes(&self) -> &[ConversionOutcome] {
        &self.successes
    }
    pub fn skipped(&self) -> &[ConversionOutcome] {
        &self.skipped
    }
    pub fn failed(&self) -> &[ConversionOutcome] {
        &self.failed
    }
    pub fn total_original_size(&self) -> u64 {
        self.total_original_size
    }
    pub fn total_new_size(&self) -> u64 {
        self.total_new_size
    }
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
