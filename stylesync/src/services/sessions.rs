use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use lru::LruCache;
use nanoid::nanoid;
use tokio::sync::RwLock as AsyncRwLock;
use tracing::{debug, info};

use crate::error::{Result, StyleSyncError};
use crate::intelligence::{resolve_outfit, Stylist};
use crate::models::{OutfitRecommendation, WardrobeItem};
use crate::services::Wardrobe;

/// One user's conversation with the app: a wardrobe plus the bot serving it.
pub struct Session {
    id: String,
    created_at: DateTime<Utc>,
    last_seen: Mutex<Instant>,
    wardrobe: AsyncRwLock<Wardrobe>,
    stylist: RwLock<Stylist>,
}

impl Session {
    fn new(stylist: Stylist) -> Self {
        Self {
            id: nanoid!(),
            created_at: Utc::now(),
            last_seen: Mutex::new(Instant::now()),
            wardrobe: AsyncRwLock::new(Wardrobe::new()),
            stylist: RwLock::new(stylist),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn touch(&self) {
        *self
            .last_seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .elapsed()
    }

    /// Snapshot of the current bot.
    pub fn stylist(&self) -> Stylist {
        self.stylist
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the bot, e.g. once the user has entered a credential.
    pub fn set_stylist(&self, stylist: Stylist) {
        *self
            .stylist
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = stylist;
    }

    fn ready_stylist(&self) -> Result<Stylist> {
        let stylist = self.stylist();
        if stylist.is_ready() {
            return Ok(stylist);
        }
        match stylist.unavailable_reason() {
            Some(reason) => Err(StyleSyncError::LlmUnavailable(reason.to_string())),
            None => Err(StyleSyncError::MissingCredential),
        }
    }

    pub async fn wardrobe(&self) -> Wardrobe {
        self.wardrobe.read().await.clone()
    }

    pub async fn item_count(&self) -> usize {
        self.wardrobe.read().await.len()
    }

    pub async fn get_item(&self, id: &str) -> Option<WardrobeItem> {
        self.wardrobe.read().await.get_by_id(id).cloned()
    }

    /// Analyze a photo and append the result. A failed analysis leaves the
    /// wardrobe untouched.
    pub async fn analyze_and_add(&self, image_bytes: &[u8]) -> Result<WardrobeItem> {
        let stylist = self.ready_stylist()?;
        let item = stylist.extractor().analyze(image_bytes).await?;

        // A session removed while the model call was in flight still takes
        // the item; nothing can read it afterwards.
        let mut wardrobe = self.wardrobe.write().await;
        let id = wardrobe.add(item.clone());
        info!(session_id = %self.id, item_id = id, category = %item.category, "Item added to wardrobe");

        Ok(WardrobeItem::new(id, item))
    }

    /// Recommend outfits and resolve the recommended ids against the wardrobe
    /// as it was when the request started.
    pub async fn recommend(
        &self,
        preferences: &str,
        max_items: Option<usize>,
    ) -> Result<(OutfitRecommendation, Vec<WardrobeItem>)> {
        let stylist = self.ready_stylist()?;
        let wardrobe = self.wardrobe().await;

        let recommendation = stylist
            .recommender()
            .recommend(&wardrobe, preferences, max_items)
            .await?;
        let outfit = resolve_outfit(&wardrobe, &recommendation);

        Ok((recommendation, outfit))
    }
}

/// Live sessions, least recently used evicted first once full.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<LruCache<String, Arc<Session>>>>,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(max_sessions: usize, idle_timeout_secs: u64) -> Self {
        let capacity = NonZeroUsize::new(max_sessions).unwrap_or(NonZeroUsize::MIN);
        Self {
            sessions: Arc::new(Mutex::new(LruCache::new(capacity))),
            idle_timeout: Duration::from_secs(idle_timeout_secs),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, Arc<Session>>> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn create(&self, stylist: Stylist) -> Arc<Session> {
        let session = Arc::new(Session::new(stylist));
        if let Some((evicted, _)) = self.lock().push(session.id.clone(), session.clone()) {
            if evicted != session.id {
                info!(session_id = %evicted, "Session evicted, registry full");
            }
        }
        debug!(session_id = %session.id, "Session created");
        session
    }

    /// Look a session up and refresh its idle timer.
    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        let session = self.lock().get(id).cloned()?;
        session.touch();
        Some(session)
    }

    pub fn remove(&self, id: &str) -> bool {
        let removed = self.lock().pop(id).is_some();
        if removed {
            debug!(session_id = %id, "Session removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every session idle for at least the configured timeout.
    pub fn remove_idle(&self) -> usize {
        let mut sessions = self.lock();
        let expired: Vec<String> = sessions
            .iter()
            .filter(|(_, session)| session.idle_for() >= self.idle_timeout)
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            sessions.pop(id);
        }
        expired.len()
    }
}

/// Background task body that expires idle sessions.
#[derive(Clone)]
pub struct SessionSweeper {
    registry: SessionRegistry,
    interval_secs: u64,
}

impl SessionSweeper {
    pub fn new(registry: SessionRegistry, interval_secs: u64) -> Self {
        Self {
            registry,
            interval_secs: interval_secs.max(1),
        }
    }

    /// Run a single sweep. Returns the number of sessions removed.
    pub fn run_once(&self) -> usize {
        let removed = self.registry.remove_idle();
        if removed > 0 {
            info!(
                "Session sweep complete: {} expired, {} remaining",
                removed,
                self.registry.len()
            );
        } else {
            debug!("Session sweep found no idle sessions");
        }
        removed
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }
}
