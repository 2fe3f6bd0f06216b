//! The generic cached entity store.
//!
//! One `EntityStore` exists per entity type. It owns every record
//! loaded or created during the session (the cache) and an identity
//! map from primary key to the single live instance representing that
//! row. Writes go through to SQLite first; the cache is only mutated
//! after the statement succeeds, so a failed write leaves memory and
//! disk agreeing that nothing happened.
//!
//! All operations run on the caller's thread; there is no locking
//! because no external mutation path exists.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use rusqlite::{Connection, DatabaseName, OptionalExtension};

use crate::entity::{ColumnMeta, Entity, Predicate};

/// A cache-resident record handle. Handles obtained from `get` for the
/// same id are the same allocation (`Rc::ptr_eq`).
pub type Cached<E> = Rc<RefCell<E>>;

/// Lookup counters, owned by the store and readable via
/// [`EntityStore::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the identity map.
    pub hits: u64,
    /// Lookups that had to query the backing store.
    pub misses: u64,
    /// Lookups short-circuited because the id was not a persisted key.
    pub skips: u64,
}

/// Cache + identity map + persistence for one entity type.
///
/// Constructed explicitly with a shared connection and passed to
/// whoever needs it; there is no global instance.
pub struct EntityStore<E: Entity> {
    conn: Rc<Connection>,
    cache: Vec<Cached<E>>,
    index_by_id: HashMap<i64, Cached<E>>,
    stats: CacheStats,
}

impl<E: Entity> EntityStore<E> {
    pub fn new(conn: Rc<Connection>) -> Self {
        EntityStore {
            conn,
            cache: Vec::new(),
            index_by_id: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Create the backing table and indexes if absent. Logged and
    /// reported as `false` on failure so startup can continue degraded.
    pub fn ensure(&self) -> bool {
        match E::ensure_table(&self.conn) {
            Ok(()) => true,
            Err(e) => {
                log::error!("{}: schema creation failed: {e}", E::TABLE);
                false
            }
        }
    }

    /// Allocate a new unsaved record (id -1) owned by this store's
    /// cache. No I/O happens until `save`.
    pub fn create(&mut self) -> Cached<E> {
        let mut entity = E::default();
        entity.set_id(-1);
        let entity: Cached<E> = Rc::new(RefCell::new(entity));
        self.cache.push(entity.clone());
        entity
    }

    /// Deep-copy `source` into a fresh cache record with id forced to
    /// -1, so the next `save` inserts. Dependent child rows are not
    /// cloned; callers relink those themselves.
    pub fn clone_record(&mut self, source: &E) -> Cached<E> {
        let entity = self.create();
        {
            let mut copy = entity.borrow_mut();
            *copy = source.clone();
            copy.set_id(-1);
        }
        entity
    }

    /// Save a cache-resident handle: insert when unsaved, update in
    /// place when persisted. Returns `false` (logged, no cache
    /// mutation) on failure or against a read-only database.
    ///
    /// The caller must not hold a borrow of `record` across this call.
    pub fn save(&mut self, record: &Cached<E>) -> bool {
        if self.read_only() {
            log::warn!("{}: save rejected, database is read-only", E::TABLE);
            return false;
        }

        let id = record.borrow().id();
        if id <= 0 {
            let new_id = match record.borrow().insert(&self.conn) {
                Ok(new_id) => new_id,
                Err(e) => {
                    self.log_write_failure("insert", &record.borrow(), &e);
                    return false;
                }
            };
            record.borrow_mut().set_id(new_id);
            if !self.cache.iter().any(|c| Rc::ptr_eq(c, record)) {
                self.cache.push(record.clone());
            }
            self.index_by_id.insert(new_id, record.clone());
            return true;
        }

        if let Err(e) = record.borrow().update(&self.conn) {
            self.log_write_failure("update", &record.borrow(), &e);
            return false;
        }
        let snapshot = record.borrow().clone();
        self.write_through(id, &snapshot, Some(record));
        true
    }

    /// Save a detached record value (e.g. a row obtained from `all`).
    ///
    /// Inserts register a copy in the cache and identity map; updates
    /// write through into every cached instance with the same id so
    /// outstanding handles observe the new values.
    pub fn save_value(&mut self, record: &mut E) -> bool {
        if self.read_only() {
            log::warn!("{}: save rejected, database is read-only", E::TABLE);
            return false;
        }

        if record.id() <= 0 {
            let new_id = match record.insert(&self.conn) {
                Ok(new_id) => new_id,
                Err(e) => {
                    self.log_write_failure("insert", record, &e);
                    return false;
                }
            };
            record.set_id(new_id);
            let cached: Cached<E> = Rc::new(RefCell::new(record.clone()));
            self.cache.push(cached.clone());
            self.index_by_id.insert(new_id, cached);
            return true;
        }

        if let Err(e) = record.update(&self.conn) {
            self.log_write_failure("update", record, &e);
            return false;
        }
        self.write_through(record.id(), record, None);
        true
    }

    /// Delete the row and purge every cached instance with that id.
    /// Removing an unsaved id is a no-op returning `false`.
    pub fn remove(&mut self, id: i64) -> bool {
        if id <= 0 {
            return false;
        }
        let sql = format!("DELETE FROM {} WHERE id = ?1", E::TABLE);
        if let Err(e) = self.conn.execute(&sql, [id]) {
            log::error!("{}: delete of {id} failed: {e}", E::TABLE);
            return false;
        }
        self.index_by_id.remove(&id);
        self.cache.retain(|cached| cached.borrow().id() != id);
        true
    }

    /// Handle variant of [`EntityStore::remove`]; on success the
    /// handle's id is reset to -1. The caller keeps the (now detached)
    /// allocation alive for as long as it holds the `Rc`.
    pub fn remove_record(&mut self, record: &Cached<E>) -> bool {
        let id = record.borrow().id();
        if !self.remove(id) {
            return false;
        }
        record.borrow_mut().set_id(-1);
        true
    }

    /// Look up a record by primary key.
    ///
    /// Identity-map hits return the cached handle; misses query the
    /// backing store and register the materialized record. Absent rows
    /// and query failures (logged) yield `None`; ids below 1 are
    /// short-circuited without touching the database.
    pub fn get(&mut self, id: i64) -> Option<Cached<E>> {
        if id <= 0 {
            self.stats.skips += 1;
            return None;
        }
        if let Some(cached) = self.index_by_id.get(&id) {
            self.stats.hits += 1;
            return Some(cached.clone());
        }

        self.stats.misses += 1;
        let sql = format!("{} WHERE id = ?1", E::SELECT_SQL);
        let fetched = self
            .conn
            .query_row(&sql, [id], |row| E::from_row(row))
            .optional();
        match fetched {
            Ok(Some(entity)) => {
                let cached: Cached<E> = Rc::new(RefCell::new(entity));
                self.cache.push(cached.clone());
                self.index_by_id.insert(id, cached.clone());
                Some(cached)
            }
            Ok(None) => None,
            Err(e) => {
                log::error!("{}: lookup of {id} failed: {e}", E::TABLE);
                None
            }
        }
    }

    /// Linear AND scan of the identity map; returns the first record
    /// matching every predicate. O(cache size) by design; per-entity
    /// row counts in this domain are modest.
    pub fn get_one(&mut self, predicates: &[Predicate<E::Column>]) -> Option<Cached<E>> {
        for cached in self.index_by_id.values() {
            let entity = cached.borrow();
            if entity.id() > 0 && predicates.iter().all(|p| entity.matches(p)) {
                drop(entity);
                self.stats.hits += 1;
                return Some(cached.clone());
            }
        }
        self.stats.misses += 1;
        None
    }

    /// Fetch every row directly from the backing store, bypassing the
    /// cache. The result is a list of fresh values: they are not
    /// registered in the identity map and are not the instances `get`
    /// returns. Errors are logged and yield an empty list.
    pub fn all(&self, order: Option<E::Column>, ascending: bool) -> Vec<E> {
        let sql = match order {
            Some(col) => format!(
                "{} ORDER BY {} COLLATE NOCASE {}",
                E::SELECT_SQL,
                col.name(),
                if ascending { "ASC" } else { "DESC" }
            ),
            None => E::SELECT_SQL.to_string(),
        };
        let fetch = || -> Result<Vec<E>, rusqlite::Error> {
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map([], |row| E::from_row(row))?;
            rows.collect()
        };
        match fetch() {
            Ok(list) => list,
            Err(e) => {
                log::error!("{}: list query failed: {e}", E::TABLE);
                Vec::new()
            }
        }
    }

    /// Release every cached record and clear the identity map. Used at
    /// teardown; outstanding handles keep their records alive but the
    /// store no longer knows them.
    pub fn destroy_cache(&mut self) {
        self.cache.clear();
        self.index_by_id.clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of records currently cached (persisted and unsaved).
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    // ── Savepoints ──────────────────────────────────────────────────────────

    /// Open a named savepoint on the shared connection. Savepoints
    /// nest; each store uses a name derived from its table.
    pub fn savepoint(&self) -> bool {
        self.run_savepoint_sql(&format!("SAVEPOINT sp_{}", E::TABLE))
    }

    /// Commit the most recent savepoint opened by this store.
    pub fn release_savepoint(&self) -> bool {
        self.run_savepoint_sql(&format!("RELEASE SAVEPOINT sp_{}", E::TABLE))
    }

    /// Undo all work since this store's savepoint. The savepoint stays
    /// open and still needs a release.
    pub fn rollback_savepoint(&self) -> bool {
        self.run_savepoint_sql(&format!("ROLLBACK TO SAVEPOINT sp_{}", E::TABLE))
    }

    fn run_savepoint_sql(&self, sql: &str) -> bool {
        match self.conn.execute_batch(sql) {
            Ok(()) => true,
            Err(e) => {
                log::error!("{}: {sql} failed: {e}", E::TABLE);
                false
            }
        }
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn read_only(&self) -> bool {
        self.conn
            .is_readonly(DatabaseName::Main)
            .unwrap_or(false)
    }

    /// Overwrite every cached instance carrying `id` with `snapshot`,
    /// skipping `origin` (the handle the new values came from).
    fn write_through(&self, id: i64, snapshot: &E, origin: Option<&Cached<E>>) {
        for cached in &self.cache {
            if let Some(origin) = origin {
                if Rc::ptr_eq(cached, origin) {
                    continue;
                }
            }
            if cached.borrow().id() == id {
                *cached.borrow_mut() = snapshot.clone();
            }
        }
    }

    fn log_write_failure(&self, action: &str, record: &E, err: &rusqlite::Error) {
        let dump = serde_json::to_string(record).unwrap_or_default();
        log::error!("{}: {action} failed: {err}, {dump}", E::TABLE);
    }
}
