//! In-memory collaborators.
//!
//! Every implementation keeps its state behind a `parking_lot::Mutex` and
//! counts calls per operation so tests can assert which collaborators a
//! request touched. Repositories attached to an [`InMemoryDataManager`]
//! commit it on `save()`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use chrono::Utc;
use parking_lot::Mutex;
use pinfluencer_core::{ids, PinfluencerError, PinfluencerResult};
use pinfluencer_domain::{
    AudienceRepository, AuthUserRepository, BrandRepository, Campaign, CampaignRepository,
    DataManager, ImageRepository, Notification, NotificationRepository, User, UserRepository,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Per-operation call counters.
#[derive(Debug, Default)]
pub struct CallLog {
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl CallLog {
    fn record(&self, operation: &'static str) {
        *self.calls.lock().entry(operation).or_default() += 1;
    }

    /// Returns how often `operation` was called.
    #[must_use]
    pub fn count(&self, operation: &str) -> usize {
        self.calls.lock().get(operation).copied().unwrap_or_default()
    }

    /// Returns the number of calls across all operations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.calls.lock().values().sum()
    }
}

/// Unit-of-work bookkeeping shared by the repositories of one backend.
#[derive(Debug, Default)]
pub struct InMemoryDataManager {
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
    cleanups: AtomicUsize,
    fail_commits: AtomicBool,
}

impl InMemoryDataManager {
    /// Creates a session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following commit fail.
    pub fn fail_commits(&self) {
        self.fail_commits.store(true, Ordering::SeqCst);
    }

    /// Number of commits.
    #[must_use]
    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Number of rollbacks.
    #[must_use]
    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }

    /// Number of cleanups.
    #[must_use]
    pub fn cleanups(&self) -> usize {
        self.cleanups.load(Ordering::SeqCst)
    }
}

impl DataManager for InMemoryDataManager {
    fn commit(&self) -> PinfluencerResult<()> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(PinfluencerError::external("database", anyhow!("commit rejected")));
        }
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn rollback(&self) -> PinfluencerResult<()> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn cleanup(&self) {
        self.cleanups.fetch_add(1, Ordering::SeqCst);
    }
}

fn commit(session: Option<&Arc<InMemoryDataManager>>) -> PinfluencerResult<()> {
    session.map_or(Ok(()), |session| session.commit())
}

fn now() -> Value {
    Value::String(Utc::now().to_rfc3339())
}

/// Overwrites top-level fields of a record through its JSON form.
fn stamp<M: Serialize + DeserializeOwned>(record: M, fields: &[(&str, Value)]) -> PinfluencerResult<M> {
    let mut value = serde_json::to_value(record)?;
    if let Value::Object(map) = &mut value {
        for (name, field) in fields {
            map.insert((*name).to_string(), field.clone());
        }
    }
    Ok(serde_json::from_value(value)?)
}

fn text_field<M: Serialize>(record: &M, name: &str) -> Option<String> {
    serde_json::to_value(record)
        .ok()?
        .get(name)?
        .as_str()
        .map(str::to_owned)
}

/// Account resource storage keyed by owning auth user.
#[derive(Debug)]
pub struct InMemoryUserRepository<M> {
    resource: &'static str,
    records: Mutex<Vec<M>>,
    calls: CallLog,
    session: Option<Arc<InMemoryDataManager>>,
}

impl<M> InMemoryUserRepository<M>
where
    M: Serialize + DeserializeOwned + Clone,
{
    /// Creates an empty repository; `resource` names it in errors.
    #[must_use]
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            records: Mutex::new(Vec::new()),
            calls: CallLog::default(),
            session: None,
        }
    }

    /// Commits `session` on every save.
    #[must_use]
    pub fn with_session(mut self, session: Arc<InMemoryDataManager>) -> Self {
        self.session = Some(session);
        self
    }

    /// Stores a record as is.
    pub fn insert(&self, record: M) {
        self.records.lock().push(record);
    }

    /// Returns a snapshot of the stored records.
    #[must_use]
    pub fn records(&self) -> Vec<M> {
        self.records.lock().clone()
    }

    /// Returns the call counters.
    #[must_use]
    pub const fn calls(&self) -> &CallLog {
        &self.calls
    }

    fn find(&self, field: &str, value: &str) -> Option<(usize, M)> {
        self.records
            .lock()
            .iter()
            .enumerate()
            .find(|(_, record)| text_field(*record, field).as_deref() == Some(value))
            .map(|(index, record)| (index, record.clone()))
    }
}

impl<M> UserRepository<M> for InMemoryUserRepository<M>
where
    M: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    fn load_collection(&self) -> PinfluencerResult<Vec<M>> {
        self.calls.record("load_collection");
        Ok(self.records())
    }

    fn load_by_id(&self, id: &str) -> PinfluencerResult<M> {
        self.calls.record("load_by_id");
        self.find("id", id)
            .map(|(_, record)| record)
            .ok_or_else(|| PinfluencerError::not_found(self.resource, id))
    }

    fn load_for_auth_user(&self, auth_user_id: &str) -> PinfluencerResult<M> {
        self.calls.record("load_for_auth_user");
        self.find("auth_user_id", auth_user_id)
            .map(|(_, record)| record)
            .ok_or_else(|| PinfluencerError::not_found(self.resource, auth_user_id))
    }

    fn write_new_for_auth_user(&self, auth_user_id: &str, payload: M) -> PinfluencerResult<M> {
        self.calls.record("write_new_for_auth_user");
        if self.find("auth_user_id", auth_user_id).is_some() {
            return Err(PinfluencerError::already_exists(self.resource, auth_user_id));
        }
        let record = stamp(
            payload,
            &[
                ("id", Value::String(ids::new_id())),
                ("created", now()),
                ("auth_user_id", Value::String(auth_user_id.to_string())),
            ],
        )?;
        self.records.lock().push(record.clone());
        Ok(record)
    }

    fn update_for_auth_user(&self, auth_user_id: &str, payload: M) -> PinfluencerResult<M> {
        self.calls.record("update_for_auth_user");
        let (index, existing) = self
            .find("auth_user_id", auth_user_id)
            .ok_or_else(|| PinfluencerError::not_found(self.resource, auth_user_id))?;
        let existing = serde_json::to_value(existing)?;
        let record = stamp(
            payload,
            &[
                ("id", existing["id"].clone()),
                ("created", existing["created"].clone()),
                ("auth_user_id", Value::String(auth_user_id.to_string())),
            ],
        )?;
        self.records.lock()[index] = record.clone();
        Ok(record)
    }

    fn save(&self) -> PinfluencerResult<()> {
        self.calls.record("save");
        commit(self.session.as_ref())
    }
}

/// Campaign storage resolving ownership through a brand repository.
pub struct InMemoryCampaignRepository {
    brands: Arc<BrandRepository>,
    records: Mutex<Vec<Campaign>>,
    calls: CallLog,
    session: Option<Arc<InMemoryDataManager>>,
}

impl InMemoryCampaignRepository {
    /// Creates an empty repository over the given brands.
    #[must_use]
    pub fn new(brands: Arc<BrandRepository>) -> Self {
        Self {
            brands,
            records: Mutex::new(Vec::new()),
            calls: CallLog::default(),
            session: None,
        }
    }

    /// Commits `session` on every save.
    #[must_use]
    pub fn with_session(mut self, session: Arc<InMemoryDataManager>) -> Self {
        self.session = Some(session);
        self
    }

    /// Stores a campaign as is.
    pub fn insert(&self, campaign: Campaign) {
        self.records.lock().push(campaign);
    }

    /// Returns a snapshot of the stored campaigns.
    #[must_use]
    pub fn records(&self) -> Vec<Campaign> {
        self.records.lock().clone()
    }

    /// Returns the call counters.
    #[must_use]
    pub const fn calls(&self) -> &CallLog {
        &self.calls
    }
}

impl CampaignRepository for InMemoryCampaignRepository {
    fn load_collection(&self) -> PinfluencerResult<Vec<Campaign>> {
        self.calls.record("load_collection");
        Ok(self.records())
    }

    fn load_by_id(&self, id: &str) -> PinfluencerResult<Campaign> {
        self.calls.record("load_by_id");
        self.records
            .lock()
            .iter()
            .find(|campaign| campaign.id == id)
            .cloned()
            .ok_or_else(|| PinfluencerError::not_found("campaign", id))
    }

    fn load_for_auth_brand(&self, auth_user_id: &str) -> PinfluencerResult<Vec<Campaign>> {
        self.calls.record("load_for_auth_brand");
        let brand = self.brands.load_for_auth_user(auth_user_id)?;
        Ok(self
            .records
            .lock()
            .iter()
            .filter(|campaign| campaign.brand_id == brand.id)
            .cloned()
            .collect())
    }

    fn write_new_for_brand(&self, auth_user_id: &str, payload: Campaign) -> PinfluencerResult<Campaign> {
        self.calls.record("write_new_for_brand");
        let brand = self.brands.load_for_auth_user(auth_user_id)?;
        let campaign = Campaign {
            id: ids::new_id(),
            created: Utc::now(),
            brand_id: brand.id,
            ..payload
        };
        self.records.lock().push(campaign.clone());
        Ok(campaign)
    }

    fn update_for_brand(&self, auth_user_id: &str, payload: Campaign) -> PinfluencerResult<Campaign> {
        self.calls.record("update_for_brand");
        let brand = self.brands.load_for_auth_user(auth_user_id)?;
        let mut records = self.records.lock();
        let existing = records
            .iter_mut()
            .find(|campaign| campaign.id == payload.id && campaign.brand_id == brand.id)
            .ok_or_else(|| PinfluencerError::not_found("campaign", &payload.id))?;
        *existing = Campaign {
            id: existing.id.clone(),
            created: existing.created,
            brand_id: brand.id,
            ..payload
        };
        Ok(existing.clone())
    }

    fn save(&self) -> PinfluencerResult<()> {
        self.calls.record("save");
        commit(self.session.as_ref())
    }
}

impl std::fmt::Debug for InMemoryCampaignRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCampaignRepository")
            .field("records", &self.records.lock().len())
            .finish_non_exhaustive()
    }
}

/// Notification storage.
#[derive(Debug, Default)]
pub struct InMemoryNotificationRepository {
    records: Mutex<Vec<Notification>>,
    calls: CallLog,
    session: Option<Arc<InMemoryDataManager>>,
}

impl InMemoryNotificationRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits `session` on every save.
    #[must_use]
    pub fn with_session(mut self, session: Arc<InMemoryDataManager>) -> Self {
        self.session = Some(session);
        self
    }

    /// Returns a snapshot of the stored notifications.
    #[must_use]
    pub fn records(&self) -> Vec<Notification> {
        self.records.lock().clone()
    }

    /// Returns the call counters.
    #[must_use]
    pub const fn calls(&self) -> &CallLog {
        &self.calls
    }
}

impl NotificationRepository for InMemoryNotificationRepository {
    fn load_collection(&self) -> PinfluencerResult<Vec<Notification>> {
        self.calls.record("load_collection");
        Ok(self.records())
    }

    fn load_by_id(&self, id: &str) -> PinfluencerResult<Notification> {
        self.calls.record("load_by_id");
        self.records
            .lock()
            .iter()
            .find(|notification| notification.id == id)
            .cloned()
            .ok_or_else(|| PinfluencerError::not_found("notification", id))
    }

    fn write_new_for_auth_user(
        &self,
        auth_user_id: &str,
        payload: Notification,
    ) -> PinfluencerResult<Notification> {
        self.calls.record("write_new_for_auth_user");
        let notification = Notification {
            id: ids::new_id(),
            created: Utc::now(),
            sender_id: auth_user_id.to_string(),
            ..payload
        };
        self.records.lock().push(notification.clone());
        Ok(notification)
    }

    fn save(&self) -> PinfluencerResult<()> {
        self.calls.record("save");
        commit(self.session.as_ref())
    }
}

/// Audience split storage keyed by auth user.
///
/// Entries of the stored lists are given an id and timestamp on write.
#[derive(Debug)]
pub struct InMemoryAudienceRepository<S> {
    splits: Mutex<HashMap<String, S>>,
    calls: CallLog,
    session: Option<Arc<InMemoryDataManager>>,
}

impl<S: Serialize + DeserializeOwned + Clone + Default> InMemoryAudienceRepository<S> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            splits: Mutex::new(HashMap::new()),
            calls: CallLog::default(),
            session: None,
        }
    }

    /// Commits `session` on every save.
    #[must_use]
    pub fn with_session(mut self, session: Arc<InMemoryDataManager>) -> Self {
        self.session = Some(session);
        self
    }

    /// Returns the stored splits of an auth user.
    #[must_use]
    pub fn get(&self, auth_user_id: &str) -> Option<S> {
        self.splits.lock().get(auth_user_id).cloned()
    }

    /// Returns the call counters.
    #[must_use]
    pub const fn calls(&self) -> &CallLog {
        &self.calls
    }

    fn stamp_entries(payload: S) -> PinfluencerResult<S> {
        let mut value = serde_json::to_value(payload)?;
        if let Value::Object(fields) = &mut value {
            let entries = fields
                .values_mut()
                .filter_map(Value::as_array_mut)
                .flatten()
                .filter_map(Value::as_object_mut);
            for entry in entries {
                if entry.get("id").and_then(Value::as_str).map_or(true, str::is_empty) {
                    entry.insert("id".to_string(), Value::String(ids::new_id()));
                    entry.insert("created".to_string(), now());
                }
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}

impl<S: Serialize + DeserializeOwned + Clone + Default> Default for InMemoryAudienceRepository<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> AudienceRepository<S> for InMemoryAudienceRepository<S>
where
    S: Serialize + DeserializeOwned + Clone + Default + Send + Sync,
{
    fn write_new_for_influencer(&self, auth_user_id: &str, payload: S) -> PinfluencerResult<S> {
        self.calls.record("write_new_for_influencer");
        if self.splits.lock().contains_key(auth_user_id) {
            return Err(PinfluencerError::already_exists("audience", auth_user_id));
        }
        let splits = Self::stamp_entries(payload)?;
        self.splits
            .lock()
            .insert(auth_user_id.to_string(), splits.clone());
        Ok(splits)
    }

    fn load_for_influencer(&self, auth_user_id: &str) -> PinfluencerResult<S> {
        self.calls.record("load_for_influencer");
        Ok(self.get(auth_user_id).unwrap_or_default())
    }

    fn update_for_influencer(&self, auth_user_id: &str, payload: S) -> PinfluencerResult<S> {
        self.calls.record("update_for_influencer");
        if !self.splits.lock().contains_key(auth_user_id) {
            return Err(PinfluencerError::not_found("audience", auth_user_id));
        }
        let splits = Self::stamp_entries(payload)?;
        self.splits
            .lock()
            .insert(auth_user_id.to_string(), splits.clone());
        Ok(splits)
    }

    fn save(&self) -> PinfluencerResult<()> {
        self.calls.record("save");
        commit(self.session.as_ref())
    }
}

/// Object storage keeping uploads in memory.
#[derive(Debug, Default)]
pub struct InMemoryImageRepository {
    objects: Mutex<Vec<(String, Vec<u8>)>>,
    fail_uploads: AtomicBool,
}

impl InMemoryImageRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following upload fail.
    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    /// Returns the stored objects as `(key, bytes)` pairs.
    #[must_use]
    pub fn uploads(&self) -> Vec<(String, Vec<u8>)> {
        self.objects.lock().clone()
    }
}

impl ImageRepository for InMemoryImageRepository {
    fn upload(&self, path: &str, image: &[u8]) -> PinfluencerResult<String> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(PinfluencerError::external("object storage", anyhow!("upload rejected")));
        }
        let key = format!("{path}/{}.png", ids::new_id());
        self.objects.lock().push((key.clone(), image.to_vec()));
        Ok(key)
    }

    fn delete(&self, path: &str) -> PinfluencerResult<()> {
        let mut objects = self.objects.lock();
        let before = objects.len();
        objects.retain(|(key, _)| key != path);
        if objects.len() == before {
            return Err(PinfluencerError::not_found("image", path));
        }
        Ok(())
    }
}

/// Identity provider profiles.
#[derive(Debug, Default)]
pub struct InMemoryAuthUserRepository {
    users: Mutex<HashMap<String, User>>,
    brand_claim_updates: AtomicUsize,
    influencer_claim_updates: AtomicUsize,
}

impl InMemoryAuthUserRepository {
    /// Creates an empty identity provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a profile.
    pub fn insert(&self, user: User) {
        self.users.lock().insert(user.auth_user_id.clone(), user);
    }

    /// Number of brand claim updates.
    #[must_use]
    pub fn brand_claim_updates(&self) -> usize {
        self.brand_claim_updates.load(Ordering::SeqCst)
    }

    /// Number of influencer claim updates.
    #[must_use]
    pub fn influencer_claim_updates(&self) -> usize {
        self.influencer_claim_updates.load(Ordering::SeqCst)
    }
}

impl AuthUserRepository for InMemoryAuthUserRepository {
    fn get_by_id(&self, auth_user_id: &str) -> PinfluencerResult<User> {
        self.users
            .lock()
            .get(auth_user_id)
            .cloned()
            .ok_or_else(|| PinfluencerError::not_found("auth user", auth_user_id))
    }

    fn update_brand_claims(&self, user: &User) -> PinfluencerResult<()> {
        self.insert(user.clone());
        self.brand_claim_updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn update_influencer_claims(&self, user: &User) -> PinfluencerResult<()> {
        self.insert(user.clone());
        self.influencer_claim_updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinfluencer_domain::{AudienceAge, AudienceAgeSplit, Brand};

    fn brands() -> Arc<InMemoryUserRepository<Brand>> {
        Arc::new(InMemoryUserRepository::new("brand"))
    }

    #[test]
    fn test_write_new_stamps_identity() {
        let repo = brands();
        let brand = repo
            .write_new_for_auth_user("owner", Brand { brand_name: "acme".into(), ..Brand::default() })
            .unwrap();

        assert!(ids::valid_uuid(&brand.id));
        assert_eq!(brand.auth_user_id, "owner");
        assert_eq!(brand.brand_name, "acme");
        assert_eq!(repo.load_by_id(&brand.id).unwrap(), brand);
        assert_eq!(repo.calls().count("write_new_for_auth_user"), 1);
    }

    #[test]
    fn test_second_write_already_exists() {
        let repo = brands();
        repo.write_new_for_auth_user("owner", Brand::default()).unwrap();
        let err = repo.write_new_for_auth_user("owner", Brand::default()).unwrap_err();
        assert!(err.is_already_exists());
        assert_eq!(repo.records().len(), 1);
    }

    #[test]
    fn test_update_keeps_identity() {
        let repo = brands();
        let created = repo.write_new_for_auth_user("owner", Brand::default()).unwrap();

        let updated = repo
            .update_for_auth_user("owner", Brand { website: "https://acme.test".into(), ..Brand::default() })
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created, created.created);
        assert_eq!(updated.website, "https://acme.test");
        assert!(repo.update_for_auth_user("stranger", Brand::default()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_save_commits_session() {
        let session = Arc::new(InMemoryDataManager::new());
        let repo = InMemoryUserRepository::<Brand>::new("brand").with_session(session.clone());

        repo.save().unwrap();
        assert_eq!(session.commits(), 1);

        session.fail_commits();
        assert!(repo.save().is_err());
        assert_eq!(repo.calls().count("save"), 2);
    }

    #[test]
    fn test_campaigns_scoped_by_brand() {
        let brands = brands();
        let campaigns = InMemoryCampaignRepository::new(brands.clone());
        assert!(campaigns
            .write_new_for_brand("owner", Campaign::default())
            .unwrap_err()
            .is_not_found());

        let brand = brands.write_new_for_auth_user("owner", Brand::default()).unwrap();
        brands.write_new_for_auth_user("other", Brand::default()).unwrap();
        let campaign = campaigns.write_new_for_brand("owner", Campaign::default()).unwrap();

        assert_eq!(campaign.brand_id, brand.id);
        assert_eq!(campaigns.load_for_auth_brand("owner").unwrap().len(), 1);
        assert!(campaigns.load_for_auth_brand("other").unwrap().is_empty());
        assert!(campaigns
            .update_for_brand("other", campaign.clone())
            .unwrap_err()
            .is_not_found());

        let renamed = Campaign { campaign_title: "summer".into(), ..campaign };
        let updated = campaigns.update_for_brand("owner", renamed).unwrap();
        assert_eq!(updated.campaign_title, "summer");
    }

    #[test]
    fn test_notification_sender() {
        let repo = InMemoryNotificationRepository::new();
        let sent = repo
            .write_new_for_auth_user("sender", Notification { receiver_id: "receiver".into(), ..Notification::default() })
            .unwrap();
        assert_eq!(sent.sender_id, "sender");
        assert_eq!(repo.load_by_id(&sent.id).unwrap().receiver_id, "receiver");
    }

    #[test]
    fn test_audience_entries_stamped() {
        let repo = InMemoryAudienceRepository::<AudienceAgeSplit>::new();
        assert_eq!(repo.load_for_influencer("influencer").unwrap(), AudienceAgeSplit::default());

        let split = AudienceAgeSplit {
            audience_ages: vec![AudienceAge { min_age: 13, max_age: Some(17), split: 0.5, ..AudienceAge::default() }],
        };
        let stored = repo.write_new_for_influencer("influencer", split.clone()).unwrap();
        assert!(ids::valid_uuid(&stored.audience_ages[0].id));
        assert!(repo
            .write_new_for_influencer("influencer", split)
            .unwrap_err()
            .is_already_exists());
        assert!(repo
            .update_for_influencer("nobody", AudienceAgeSplit::default())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_image_upload_and_delete() {
        let images = InMemoryImageRepository::new();
        let key = images.upload("brands/owner", b"png").unwrap();
        assert!(key.starts_with("brands/owner/"));
        assert_eq!(images.uploads(), vec![(key.clone(), b"png".to_vec())]);

        images.delete(&key).unwrap();
        assert!(images.delete(&key).unwrap_err().is_not_found());

        images.fail_uploads();
        assert!(images.upload("brands/owner", b"png").is_err());
    }

    #[test]
    fn test_auth_user_claims() {
        let users = InMemoryAuthUserRepository::new();
        assert!(users.get_by_id("user-1").unwrap_err().is_not_found());

        let user = User { auth_user_id: "user-1".into(), email: "a@example.com".into(), ..User::default() };
        users.update_brand_claims(&user).unwrap();

        assert_eq!(users.get_by_id("user-1").unwrap(), user);
        assert_eq!(users.brand_claim_updates(), 1);
        assert_eq!(users.influencer_claim_updates(), 0);
    }

    #[test]
    fn test_data_manager_counters() {
        let session = InMemoryDataManager::new();
        session.commit().unwrap();
        session.rollback().unwrap();
        session.cleanup();
        session.cleanup();
        assert_eq!((session.commits(), session.rollbacks(), session.cleanups()), (1, 1, 2));
    }
}
