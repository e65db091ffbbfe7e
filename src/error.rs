//! Error types. Running out of room for a node is the only way the tree itself can fail; not
//! finding a value or finding a duplicate are ordinary outcomes and are reported through return
//! values instead.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A node could not be allocated. The tree is left exactly as it was before the failed call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// The allocator refused to grow node storage.
    #[error("out of memory while allocating a node")]
    OutOfMemory(#[from] TryReserveError),

    /// The tree was created with a node limit and it is already full.
    #[error("node limit of {limit} reached")]
    LimitReached {
        /// The configured maximum number of live nodes.
        limit: usize,
    },
}

/// Failure while loading integers from a data file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The data file could not be opened.
    #[error("cannot open {}", path.display())]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Why opening failed.
        #[source]
        source: io::Error,
    },

    /// Reading from an already opened source failed.
    #[error("failed to read integer data")]
    Io(#[from] io::Error),

    /// A node allocation failed part way through the load. The values read before the failure
    /// remain in the tree.
    #[error("allocation failed after loading {inserted} values")]
    Alloc {
        /// Number of values inserted before the failure.
        inserted: usize,
        /// The allocation failure that stopped the load.
        #[source]
        source: AllocError,
    },
}

/// Failure of the interactive session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading from or writing to the console failed.
    #[error("console I/O failed")]
    Io(#[from] io::Error),

    /// The data file could not be read after it was opened.
    #[error("failed to read the data file")]
    DataFile(#[source] io::Error),

    /// The input stream ended while a prompt was waiting for an answer.
    #[error("input closed")]
    InputClosed,
}

/// Menu input that does not name any action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid menu selection {0:?}")]
pub struct ParseActionError(pub String);
