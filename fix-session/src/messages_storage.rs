use std::{collections::BTreeMap, convert::Infallible, ops::RangeInclusive};

use easyfix_messages::fields::SeqNum;

pub trait MessagesStorage {
    type Error: std::error::Error;

    fn fetch(&mut self, seq_num: SeqNum) -> Result<Vec<u8>, Self::Error>;
    fn fetch_range(&mut self, range: RangeInclusive<SeqNum>) -> Result<Vec<Vec<u8>>, Self::Error>;
    fn store(&mut self, seq_num: SeqNum, data: &[u8]) -> Result<(), Self::Error>;

    //bool set( int s, const std::string& m ) EXCEPT ( IOException )
    //{ Locker l( m_mutex ); return m_pStore->set( s, m ); }

    //void get( int b, int e, std::vector < std::string > &m ) const
    //EXCEPT ( IOException )
    //{ Locker l( m_mutex ); m_pStore->get( b, e, m ); }

    fn next_sender_msg_seq_num(&self) -> SeqNum;
    fn next_target_msg_seq_num(&self) -> SeqNum;

    fn set_next_sender_msg_seq_num(&mut self, seq_num: SeqNum);
    fn set_next_target_msg_seq_num(&mut self, seq_num: SeqNum);

    fn incr_next_sender_msg_seq_num(&mut self);
    fn incr_next_target_msg_seq_num(&mut self);

    //UtcTimeStamp getCreationTime() const EXCEPT ( IOException )
    //{ Locker l( m_mutex ); return m_pStore->getCreationTime(); }

    fn reset(&mut self) -> Result<(), Self::Error>;
}

pub struct NullStorage {
    next_sender_msg_seq_num: SeqNum,
    next_target_msg_seq_num: SeqNum,
}

impl NullStorage {
    pub fn new() -> NullStorage {
        NullStorage {
            next_sender_msg_seq_num: 1,
            next_target_msg_seq_num: 1,
        }
    }
}

impl MessagesStorage for NullStorage {
    type Error = Infallible;

    fn fetch(&mut self, _seq_num: SeqNum) -> Result<Vec<u8>, Self::Error> {
        Ok(Vec::new())
    }

    fn fetch_range(&mut self, _range: RangeInclusive<SeqNum>) -> Result<Vec<Vec<u8>>, Self::Error> {
        Ok(Vec::new())
    }

    fn store(&mut self, _seq_num: SeqNum, _data: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn next_sender_msg_seq_num(&self) -> SeqNum {
        self.next_sender_msg_seq_num
    }

    fn next_target_msg_seq_num(&self) -> SeqNum {
        self.next_target_msg_seq_num
    }

    fn set_next_sender_msg_seq_num(&mut self, seq_num: SeqNum) {
        self.next_sender_msg_seq_num = seq_num;
    }

    fn set_next_target_msg_seq_num(&mut self, seq_num: SeqNum) {
        self.next_target_msg_seq_num = seq_num;
    }

    fn incr_next_sender_msg_seq_num(&mut self) {
        self.next_sender_msg_seq_num += 1;
    }

    fn incr_next_target_msg_seq_num(&mut self) {
        self.next_target_msg_seq_num += 1;
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.next_sender_msg_seq_num = 1;
        self.next_target_msg_seq_num = 1;
        Ok(())
    }
}

pub struct InMemoryStorage {
    next_sender_msg_seq_num: SeqNum,
    next_target_msg_seq_num: SeqNum,
    mem: BTreeMap<SeqNum, Vec<u8>>,
    archive: Vec<(SeqNum, Vec<u8>)>,
}

impl InMemoryStorage {
    pub fn new() -> InMemoryStorage {
        InMemoryStorage {
            next_sender_msg_seq_num: 1,
            next_target_msg_seq_num: 1,
            mem: BTreeMap::new(),
            archive: Vec::new(),
        }
    }

    /// Rows displaced by an overwriting `store` or a `reset`, oldest first.
    pub fn archive(&self) -> &[(SeqNum, Vec<u8>)] {
        &self.archive
    }
}

impl MessagesStorage for InMemoryStorage {
    type Error = Infallible;

    fn fetch(&mut self, seq_num: SeqNum) -> Result<Vec<u8>, Self::Error> {
        Ok(self.mem[&seq_num].clone())
    }

    fn fetch_range(&mut self, range: RangeInclusive<SeqNum>) -> Result<Vec<Vec<u8>>, Self::Error> {
        Ok(self.mem.range(range).map(|(_, data)| data.clone()).collect())
    }

    fn store(&mut self, seq_num: SeqNum, data: &[u8]) -> Result<(), Self::Error> {
        if let Some(old_data) = self.mem.insert(seq_num, data.to_vec()) {
            self.archive.push((seq_num, old_data));
        }
        Ok(())
    }

    fn next_sender_msg_seq_num(&self) -> SeqNum {
        self.next_sender_msg_seq_num
    }

    fn next_target_msg_seq_num(&self) -> SeqNum {
        self.next_target_msg_seq_num
    }

    fn set_next_sender_msg_seq_num(&mut self, seq_num: SeqNum) {
        self.next_sender_msg_seq_num = seq_num;
    }

    fn set_next_target_msg_seq_num(&mut self, seq_num: SeqNum) {
        self.next_target_msg_seq_num = seq_num;
    }

    fn incr_next_sender_msg_seq_num(&mut self) {
        self.next_sender_msg_seq_num += 1;
    }

    fn incr_next_target_msg_seq_num(&mut self) {
        self.next_target_msg_seq_num += 1;
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.next_sender_msg_seq_num = 1;
        self.next_target_msg_seq_num = 1;
        self.archive.extend(self.mem.iter().map(|(&seq_num, data)| (seq_num, data.clone())));
        self.mem.clear();
        Ok(())
    }
}

/// Durable, file-backed [`MessagesStorage`].
///
/// Realizes the `sessions` / `messages` / `messages_archive` relations as a
/// per-session directory:
///
/// ```text
/// <root>/session.state      -- "next_sender_msg_seq_num next_target_msg_seq_num"
/// <root>/messages/<seq>.bin -- raw serialized FIX message for that seq num
/// <root>/archive.log        -- one line per overwritten (seq, bytes) pair
/// ```
///
/// Writes fsync before returning so a crash can never observe a counter
/// advance without the corresponding message on disk. `MessagesStorage` is
/// called synchronously from the encode/verify path (same as the teacher's
/// `InMemoryStorage`), so this performs blocking `std::fs` I/O in place;
/// callers that need the runtime to stay responsive under heavy persisted
/// traffic should front it with their own buffering.
pub struct FileStorage {
    root: std::path::PathBuf,
    next_sender_msg_seq_num: SeqNum,
    next_target_msg_seq_num: SeqNum,
}

#[derive(Debug, thiserror::Error)]
pub enum FileStorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt session state file: {0}")]
    CorruptState(String),
}

impl FileStorage {
    pub fn open(root: impl Into<std::path::PathBuf>) -> Result<FileStorage, FileStorageError> {
        let root = root.into();
        std::fs::create_dir_all(root.join("messages"))?;
        let counters_path = root.join("session.state");
        let (next_sender_msg_seq_num, next_target_msg_seq_num) = if counters_path.exists() {
            let data = std::fs::read_to_string(&counters_path)?;
            let mut parts = data.split_whitespace();
            let parse = |s: Option<&str>| {
                s.and_then(|s| s.parse::<SeqNum>().ok())
                    .ok_or_else(|| FileStorageError::CorruptState(data.clone()))
            };
            (parse(parts.next())?, parse(parts.next())?)
        } else {
            (1, 1)
        };
        Ok(FileStorage {
            root,
            next_sender_msg_seq_num,
            next_target_msg_seq_num,
        })
    }

    fn message_path(&self, seq_num: SeqNum) -> std::path::PathBuf {
        self.root.join("messages").join(format!("{seq_num}.bin"))
    }

    fn persist_counters(&self) -> Result<(), FileStorageError> {
        let data = format!(
            "{} {}\n",
            self.next_sender_msg_seq_num, self.next_target_msg_seq_num
        );
        let tmp_path = self.root.join("session.state.tmp");
        let mut file = std::fs::File::create(&tmp_path)?;
        std::io::Write::write_all(&mut file, data.as_bytes())?;
        file.sync_all()?;
        std::fs::rename(tmp_path, self.root.join("session.state"))?;
        Ok(())
    }

    fn archive(&self, seq_num: SeqNum, old_data: &[u8]) -> Result<(), FileStorageError> {
        use std::io::Write;
        let mut archive = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.root.join("archive.log"))?;
        writeln!(archive, "{seq_num}\t{:?}", String::from_utf8_lossy(old_data))?;
        archive.sync_all()?;
        Ok(())
    }
}

impl MessagesStorage for FileStorage {
    type Error = FileStorageError;

    fn fetch(&mut self, seq_num: SeqNum) -> Result<Vec<u8>, Self::Error> {
        Ok(std::fs::read(self.message_path(seq_num))?)
    }

    fn fetch_range(&mut self, range: RangeInclusive<SeqNum>) -> Result<Vec<Vec<u8>>, Self::Error> {
        let mut messages = Vec::new();
        for seq_num in range {
            let path = self.message_path(seq_num);
            if path.exists() {
                messages.push(std::fs::read(path)?);
            }
        }
        Ok(messages)
    }

    fn store(&mut self, seq_num: SeqNum, data: &[u8]) -> Result<(), Self::Error> {
        let path = self.message_path(seq_num);
        if let Ok(old_data) = std::fs::read(&path) {
            self.archive(seq_num, &old_data)?;
        }
        let mut file = std::fs::File::create(&path)?;
        std::io::Write::write_all(&mut file, data)?;
        file.sync_all()?;
        Ok(())
    }

    fn next_sender_msg_seq_num(&self) -> SeqNum {
        self.next_sender_msg_seq_num
    }

    fn next_target_msg_seq_num(&self) -> SeqNum {
        self.next_target_msg_seq_num
    }

    fn set_next_sender_msg_seq_num(&mut self, seq_num: SeqNum) {
        self.next_sender_msg_seq_num = seq_num;
        let _ = self.persist_counters();
    }

    fn set_next_target_msg_seq_num(&mut self, seq_num: SeqNum) {
        self.next_target_msg_seq_num = seq_num;
        let _ = self.persist_counters();
    }

    fn incr_next_sender_msg_seq_num(&mut self) {
        self.next_sender_msg_seq_num += 1;
        let _ = self.persist_counters();
    }

    fn incr_next_target_msg_seq_num(&mut self) {
        self.next_target_msg_seq_num += 1;
        let _ = self.persist_counters();
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.next_sender_msg_seq_num = 1;
        self.next_target_msg_seq_num = 1;
        self.persist_counters()?;
        for entry in std::fs::read_dir(self.root.join("messages"))? {
            let path = entry?.path();
            let Some(seq_num) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<SeqNum>().ok())
            else {
                continue;
            };
            let old_data = std::fs::read(&path)?;
            self.archive(seq_num, &old_data)?;
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
