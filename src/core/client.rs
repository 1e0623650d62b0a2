use crate::core::batch::{fetch_batch, BatchSettings};
use crate::core::normalize::normalize;
use crate::core::transport::{HttpTransport, DEFAULT_BASE_URL};
use crate::core::ConfigProvider;
use crate::domain::model::{Id, IdSpec, Resource};
use crate::domain::ports::Transport;
use crate::utils::error::{FlyffError, Result};
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::OnceCell;

/// Client for the Flyff game-data API.
///
/// Construction never touches the network; the data version is requested on the first
/// call to [`FlyffClient::version`] and kept for the lifetime of the client.
///
/// ```no_run
/// # async fn run() -> flyff_api::Result<()> {
/// use flyff_api::{FlyffClient, Resource};
///
/// let client = FlyffClient::new();
/// let items = client.get_many(Resource::Item, vec![3, 640]).await?;
/// println!("{}", items[0]["name"]["en"]);
/// # Ok(())
/// # }
/// ```
pub struct FlyffClient<T: Transport = HttpTransport> {
    transport: T,
    batch: BatchSettings,
    version: OnceCell<Value>,
}

impl FlyffClient<HttpTransport> {
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new(DEFAULT_BASE_URL), BatchSettings::default())
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let batch = BatchSettings {
            chunk_size: config.chunk_size(),
            length_threshold: config.length_threshold(),
        };
        Ok(Self::with_transport(HttpTransport::from_config(config)?, batch))
    }
}

impl Default for FlyffClient<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> FlyffClient<T> {
    pub fn with_transport(transport: T, batch: BatchSettings) -> Self {
        Self {
            transport,
            batch,
            version: OnceCell::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn batch_settings(&self) -> &BatchSettings {
        &self.batch
    }

    /// Current data API version, fetched once.
    pub async fn version(&self) -> Result<&Value> {
        self.version
            .get_or_try_init(|| async {
                let version = self.transport.get("version/data").await?;
                tracing::info!("Flyff data version: {}", version);
                Ok::<_, FlyffError>(version)
            })
            .await
    }

    /// Everything the bare resource path returns: the ID list for collections, the full
    /// data for list-only resources.
    pub async fn list_all(&self, resource: Resource) -> Result<Value> {
        self.transport.get(resource.path()).await
    }

    pub async fn get_one(&self, resource: Resource, id: impl Into<Id>) -> Result<Value> {
        require_collection(resource, "lookup by ID")?;
        let id = id.into();
        self.transport
            .get(&format!("{}/{}", resource.path(), id))
            .await
    }

    /// Entities for every ID in `ids`, in request order, split into several requests
    /// when the ID list is long.
    pub async fn get_many(&self, resource: Resource, ids: impl Into<IdSpec>) -> Result<Vec<Value>> {
        require_collection(resource, "lookup by IDs")?;
        fetch_batch(&self.transport, resource.path(), &ids.into(), &self.batch).await
    }

    /// Every entity of a collection in one POST carrying the complete ID list.
    pub async fn get_all_in_one_request(&self, resource: Resource) -> Result<Value> {
        require_collection(resource, "bulk fetch")?;
        let ids = IdSpec::from_json(resource, &self.list_all(resource).await?)?;
        let joined = normalize(&ids);
        if joined.is_empty() {
            tracing::debug!("No {} IDs listed, skipping bulk request", resource);
            return Ok(Value::Array(Vec::new()));
        }
        let path = format!("{}/{}", resource.path(), joined);
        self.transport
            .request(Method::POST, &path, &HashMap::new())
            .await
    }

    pub async fn get_all_items(&self) -> Result<Value> {
        self.list_all(Resource::Item).await
    }

    pub async fn get_item_by_id(&self, id: impl Into<Id>) -> Result<Value> {
        self.get_one(Resource::Item, id).await
    }

    pub async fn get_items_by_ids(&self, ids: impl Into<IdSpec>) -> Result<Vec<Value>> {
        self.get_many(Resource::Item, ids).await
    }

    /// Every item in a single POST; see [`FlyffClient::get_all_in_one_request`].
    pub async fn get_all_single_items(&self) -> Result<Value> {
        self.get_all_in_one_request(Resource::Item).await
    }

    pub async fn get_all_classes(&self) -> Result<Value> {
        self.list_all(Resource::Class).await
    }

    pub async fn get_class_by_id(&self, id: impl Into<Id>) -> Result<Value> {
        self.get_one(Resource::Class, id).await
    }

    pub async fn get_classes_by_ids(&self, ids: impl Into<IdSpec>) -> Result<Vec<Value>> {
        self.get_many(Resource::Class, ids).await
    }

    pub async fn get_all_worlds(&self) -> Result<Value> {
        self.list_all(Resource::World).await
    }

    pub async fn get_world_by_id(&self, id: impl Into<Id>) -> Result<Value> {
        self.get_one(Resource::World, id).await
    }

    pub async fn get_worlds_by_ids(&self, ids: impl Into<IdSpec>) -> Result<Vec<Value>> {
        self.get_many(Resource::World, ids).await
    }

    pub async fn get_all_monsters(&self) -> Result<Value> {
        self.list_all(Resource::Monster).await
    }

    pub async fn get_monster_by_id(&self, id: impl Into<Id>) -> Result<Value> {
        self.get_one(Resource::Monster, id).await
    }

    pub async fn get_monsters_by_ids(&self, ids: impl Into<IdSpec>) -> Result<Vec<Value>> {
        self.get_many(Resource::Monster, ids).await
    }

    pub async fn get_all_equipment(&self) -> Result<Value> {
        self.list_all(Resource::EquipSet).await
    }

    pub async fn get_equipment_by_id(&self, id: impl Into<Id>) -> Result<Value> {
        self.get_one(Resource::EquipSet, id).await
    }

    pub async fn get_equipment_by_ids(&self, ids: impl Into<IdSpec>) -> Result<Vec<Value>> {
        self.get_many(Resource::EquipSet, ids).await
    }

    pub async fn get_all_skills(&self) -> Result<Value> {
        self.list_all(Resource::Skill).await
    }

    pub async fn get_skill_by_id(&self, id: impl Into<Id>) -> Result<Value> {
        self.get_one(Resource::Skill, id).await
    }

    pub async fn get_skills_by_ids(&self, ids: impl Into<IdSpec>) -> Result<Vec<Value>> {
        self.get_many(Resource::Skill, ids).await
    }

    pub async fn get_all_npcs(&self) -> Result<Value> {
        self.list_all(Resource::Npc).await
    }

    pub async fn get_npc_by_id(&self, id: impl Into<Id>) -> Result<Value> {
        self.get_one(Resource::Npc, id).await
    }

    pub async fn get_npcs_by_ids(&self, ids: impl Into<IdSpec>) -> Result<Vec<Value>> {
        self.get_many(Resource::Npc, ids).await
    }

    pub async fn get_all_party_skills(&self) -> Result<Value> {
        self.list_all(Resource::PartySkill).await
    }

    pub async fn get_party_skill_by_id(&self, id: impl Into<Id>) -> Result<Value> {
        self.get_one(Resource::PartySkill, id).await
    }

    pub async fn get_party_skills_by_ids(&self, ids: impl Into<IdSpec>) -> Result<Vec<Value>> {
        self.get_many(Resource::PartySkill, ids).await
    }

    pub async fn get_all_quests(&self) -> Result<Value> {
        self.list_all(Resource::Quest).await
    }

    pub async fn get_quest_by_id(&self, id: impl Into<Id>) -> Result<Value> {
        self.get_one(Resource::Quest, id).await
    }

    pub async fn get_quests_by_ids(&self, ids: impl Into<IdSpec>) -> Result<Vec<Value>> {
        self.get_many(Resource::Quest, ids).await
    }

    pub async fn get_all_achievements(&self) -> Result<Value> {
        self.list_all(Resource::Achievement).await
    }

    pub async fn get_achievement_by_id(&self, id: impl Into<Id>) -> Result<Value> {
        self.get_one(Resource::Achievement, id).await
    }

    pub async fn get_achievements_by_ids(&self, ids: impl Into<IdSpec>) -> Result<Vec<Value>> {
        self.get_many(Resource::Achievement, ids).await
    }

    pub async fn get_pk_info(&self) -> Result<Value> {
        self.list_all(Resource::Pk).await
    }

    pub async fn get_upgrade_bonus(&self) -> Result<Value> {
        self.list_all(Resource::UpgradeLevelBonus).await
    }

    pub async fn get_skill_awakes(&self) -> Result<Value> {
        self.list_all(Resource::SkillAwake).await
    }

    pub async fn get_pets(&self) -> Result<Value> {
        self.list_all(Resource::RaisedPet).await
    }

    pub async fn get_dungeons(&self) -> Result<Value> {
        self.list_all(Resource::Dungeon).await
    }
}

fn require_collection(resource: Resource, operation: &str) -> Result<()> {
    if resource.is_collection() {
        Ok(())
    } else {
        Err(FlyffError::UnsupportedOperation {
            resource: resource.path().to_string(),
            operation: operation.to_string(),
        })
    }
}
