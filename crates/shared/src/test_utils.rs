//! # テスト用ユーティリティ
//!
//! ログ出力を検証するためのインメモリ Writer。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! badgeapp-shared = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    io,
    sync::{Arc, Mutex},
};

use tracing_subscriber::fmt::MakeWriter;

/// ログ出力をメモリに溜める Writer
#[derive(Clone, Default)]
pub struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl BufferWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// この Writer に JSON で書き出す subscriber
    ///
    /// イベントのフィールドはトップレベルに展開される。
    /// `tracing::subscriber::with_default` / `set_default` と組み合わせて使う。
    pub fn json_subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_writer(self.clone())
            .finish()
    }

    /// 出力済みのログ（1 行 1 イベント）
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
