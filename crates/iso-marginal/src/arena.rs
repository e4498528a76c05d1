use serde::{Deserialize, Serialize};

/// Opaque handle to a configuration stored in a [`ConfArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConfId(usize);

impl ConfId {
    /// Sequential allocation index of the configuration.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Bump allocator for fixed-width configurations.
///
/// Storage grows one page at a time, so existing pages never move and
/// handles stay valid for the lifetime of the arena. Nothing is freed until
/// the whole arena is dropped.
#[derive(Debug)]
pub struct ConfArena {
    dim: usize,
    page_confs: usize,
    pages: Vec<Vec<u32>>,
    len: usize,
}

impl ConfArena {
    /// Creates an empty arena for configurations of `dim` counts, allocating
    /// `page_confs` slots per page.
    pub fn new(dim: usize, page_confs: usize) -> Self {
        Self {
            dim,
            page_confs: page_confs.max(1),
            pages: Vec::new(),
            len: 0,
        }
    }

    /// Width of every stored configuration.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of configurations allocated so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether nothing has been allocated yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copies `conf` into the arena and returns its handle.
    pub fn alloc(&mut self, conf: &[u32]) -> ConfId {
        debug_assert_eq!(conf.len(), self.dim);
        if self.len % self.page_confs == 0 {
            self.pages.push(Vec::with_capacity(self.page_confs * self.dim));
        }
        let page = self.len / self.page_confs;
        self.pages[page].extend_from_slice(conf);
        let id = ConfId(self.len);
        self.len += 1;
        id
    }

    /// Borrows the configuration behind `id`.
    #[inline]
    pub fn get(&self, id: ConfId) -> &[u32] {
        let page = &self.pages[id.0 / self.page_confs];
        let start = (id.0 % self.page_confs) * self.dim;
        &page[start..start + self.dim]
    }
}
