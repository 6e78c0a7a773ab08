//! 内存存储
//!
//! 产品与用户都保存在进程内的有序 map 中，进程重启后恢复为初始数据。
//! id 由递增计数器分配，删除后不会复用。

use std::collections::BTreeMap;

use crate::app::products::model::{NewProduct, Product, ProductId, ProductPatch};
use crate::app::users::model::{NewUser, User, UserId};

/// 存储错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("id 空间已耗尽")]
    IdExhausted,
    #[error("产品 id {0} 超出可分配范围")]
    IdOutOfRange(ProductId),
    #[error("产品 id {0} 已存在")]
    DuplicateId(ProductId),
}

/// 取出计数器当前值并推进，溢出时不修改计数器
fn allocate_id(counter: &mut i64) -> Result<i64, StorageError> {
    let id = *counter;
    *counter = id.checked_add(1).ok_or(StorageError::IdExhausted)?;
    Ok(id)
}

#[derive(Debug)]
pub struct MemStorage {
    users: BTreeMap<UserId, User>,
    products: BTreeMap<ProductId, Product>,
    current_user_id: UserId,
    current_product_id: ProductId,
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStorage {
    /// 创建空存储
    pub fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            products: BTreeMap::new(),
            current_user_id: 1,
            current_product_id: 1,
        }
    }

    // ---- 用户 ----

    /// 不检查用户名是否重复
    pub fn create_user(&mut self, input: NewUser) -> Result<User, StorageError> {
        let id = allocate_id(&mut self.current_user_id)?;

        let user = User {
            id,
            username: input.username,
            password: input.password,
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    pub fn get_user(&self, id: UserId) -> Option<User> {
        self.users.get(&id).cloned()
    }

    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    // ---- 产品 ----

    pub fn create_product(&mut self, input: NewProduct) -> Result<Product, StorageError> {
        let id = allocate_id(&mut self.current_product_id)?;

        let product = Product {
            id,
            name: input.name,
            price: input.price,
            image: input.image,
            category: input.category,
            description: input.description,
            featured: input.featured.unwrap_or(false),
            new_arrival: input.new_arrival.unwrap_or(false),
        };
        self.products.insert(id, product.clone());
        Ok(product)
    }

    /// 按原 id 写入一条产品记录（快照导入用），计数器推进到 id 之后
    ///
    /// id 已存在或为 `i64::MAX`（之后无法再分配）时拒绝写入。
    pub fn restore_product(&mut self, product: Product) -> Result<(), StorageError> {
        if self.products.contains_key(&product.id) {
            return Err(StorageError::DuplicateId(product.id));
        }
        let next = product
            .id
            .checked_add(1)
            .ok_or(StorageError::IdOutOfRange(product.id))?;

        if next > self.current_product_id {
            self.current_product_id = next;
        }
        self.products.insert(product.id, product);
        Ok(())
    }

    /// 下一个将被分配的产品 id
    pub fn next_product_id(&self) -> ProductId {
        self.current_product_id
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn get_all_products(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    pub fn get_product(&self, id: ProductId) -> Option<Product> {
        self.products.get(&id).cloned()
    }

    /// 精确匹配（区分大小写）；未知分类返回空列表
    pub fn get_products_by_category(&self, category: &str) -> Vec<Product> {
        self.filter(|product| product.category.as_str() == category)
    }

    pub fn get_featured_products(&self) -> Vec<Product> {
        self.filter(|product| product.featured)
    }

    pub fn get_new_arrivals(&self) -> Vec<Product> {
        self.filter(|product| product.new_arrival)
    }

    pub fn update_product(&mut self, id: ProductId, patch: ProductPatch) -> Option<Product> {
        let product = self.products.get_mut(&id)?;
        product.apply(patch);
        Some(product.clone())
    }

    pub fn delete_product(&mut self, id: ProductId) -> bool {
        self.products.remove(&id).is_some()
    }

    /// 名称、描述或分类中包含查询串（不区分大小写）即命中
    pub fn search_products(&self, query: &str) -> Vec<Product> {
        let query = query.to_lowercase();
        self.filter(|product| {
            product.name.to_lowercase().contains(&query)
                || product.description.to_lowercase().contains(&query)
                || product.category.as_str().contains(&query)
        })
    }

    fn filter<F>(&self, predicate: F) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
    {
        self.products
            .values()
            .filter(|product| predicate(product))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::products::model::Category;
    use crate::infrastructure::seed::seed_default_products;

    fn new_product(name: &str, category: Category, description: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: "1000".to_string(),
            image: "https://example.com/p.jpg".to_string(),
            category,
            description: description.to_string(),
            featured: None,
            new_arrival: None,
        }
    }

    fn seeded() -> MemStorage {
        let mut storage = MemStorage::new();
        seed_default_products(&mut storage);
        storage
    }

    #[test]
    fn test_create_assigns_sequential_ids_and_defaults() {
        let mut storage = MemStorage::new();
        let first = storage.create_product(new_product("A", Category::Oil, "a")).unwrap();
        let second = storage.create_product(new_product("B", Category::Oil, "b")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.featured);
        assert!(!first.new_arrival);
        assert_eq!(storage.get_product(first.id), Some(first));
    }

    #[test]
    fn test_created_product_matches_input() {
        let mut storage = MemStorage::new();
        let mut input = new_product("Rose", Category::English, "Rose water");
        input.featured = Some(true);

        let created = storage.create_product(input.clone()).unwrap();
        let fetched = storage.get_product(created.id).unwrap();

        assert_eq!(fetched.name, input.name);
        assert_eq!(fetched.price, input.price);
        assert_eq!(fetched.image, input.image);
        assert_eq!(fetched.category, input.category);
        assert_eq!(fetched.description, input.description);
        assert!(fetched.featured);
        assert!(!fetched.new_arrival);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut storage = MemStorage::new();
        let first = storage.create_product(new_product("A", Category::Oil, "a")).unwrap();
        assert!(storage.delete_product(first.id));

        let second = storage.create_product(new_product("B", Category::Oil, "b")).unwrap();
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_delete_then_get_is_absent() {
        let mut storage = seeded();
        assert!(storage.delete_product(3));
        assert_eq!(storage.get_product(3), None);
        assert!(!storage.delete_product(3));
        assert!(!storage.delete_product(999));
    }

    #[test]
    fn test_update_merges_fields() {
        let mut storage = seeded();
        let before = storage.get_product(1).unwrap();

        let updated = storage
            .update_product(
                1,
                ProductPatch {
                    price: Some("99".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price, "99");
        assert_eq!(
            updated,
            Product {
                price: "99".to_string(),
                ..before
            }
        );
        assert_eq!(storage.get_product(1), Some(updated));
    }

    #[test]
    fn test_update_unknown_id_returns_none() {
        let mut storage = seeded();
        assert_eq!(storage.update_product(42, ProductPatch::default()), None);
    }

    #[test]
    fn test_get_all_in_insertion_order() {
        let storage = seeded();
        let ids: Vec<ProductId> = storage.get_all_products().iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_category_filter() {
        let storage = seeded();
        let arabian = storage.get_products_by_category("arabian");
        assert_eq!(
            arabian.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 5]
        );
        assert!(arabian.iter().all(|p| p.category == Category::Arabian));

        assert!(storage.get_products_by_category("Arabian").is_empty());
        assert!(storage.get_products_by_category("floral").is_empty());
    }

    #[test]
    fn test_featured_and_new_arrivals() {
        let storage = seeded();
        let featured: Vec<ProductId> =
            storage.get_featured_products().iter().map(|p| p.id).collect();
        assert_eq!(featured, vec![1, 2, 4, 8]);

        let new_arrivals: Vec<ProductId> =
            storage.get_new_arrivals().iter().map(|p| p.id).collect();
        assert_eq!(new_arrivals, vec![1, 3, 5, 8]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let storage = seeded();

        let rose: Vec<ProductId> = storage.search_products("ROSE").iter().map(|p| p.id).collect();
        let expected: Vec<ProductId> = storage
            .get_all_products()
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains("rose")
                    || p.description.to_lowercase().contains("rose")
                    || p.category.as_str().contains("rose")
            })
            .map(|p| p.id)
            .collect();
        assert_eq!(rose, expected);
        assert!(rose.contains(&2));

        let oud: Vec<ProductId> = storage.search_products("oud").iter().map(|p| p.id).collect();
        assert_eq!(oud, vec![1]);

        // 分类字段也参与匹配
        let oil = storage.search_products("oil");
        assert!(oil.iter().any(|p| p.id == 3));
        assert!(oil.iter().any(|p| p.id == 7));

        assert!(storage.search_products("nothing-matches").is_empty());
    }

    fn snapshot_product(id: ProductId, name: &str) -> Product {
        Product {
            id,
            name: name.into(),
            price: "1".into(),
            image: "img".into(),
            category: Category::Luxury,
            description: "d".into(),
            featured: false,
            new_arrival: false,
        }
    }

    #[test]
    fn test_restore_advances_counter() {
        let mut storage = MemStorage::new();
        storage.restore_product(snapshot_product(10, "Snapshot")).unwrap();
        assert_eq!(storage.next_product_id(), 11);

        let created = storage.create_product(new_product("Next", Category::Oil, "n")).unwrap();
        assert_eq!(created.id, 11);
    }

    #[test]
    fn test_restore_rejects_max_id() {
        let mut storage = MemStorage::new();
        let result = storage.restore_product(snapshot_product(i64::MAX, "Overflow"));

        assert_eq!(result, Err(StorageError::IdOutOfRange(i64::MAX)));
        assert_eq!(storage.product_count(), 0);
        assert_eq!(storage.next_product_id(), 1);
    }

    #[test]
    fn test_create_fails_when_ids_exhausted() {
        let mut storage = MemStorage::new();
        storage.restore_product(snapshot_product(i64::MAX - 1, "Last")).unwrap();
        assert_eq!(storage.next_product_id(), i64::MAX);

        let result = storage.create_product(new_product("Extra", Category::Oil, "e"));
        assert_eq!(result, Err(StorageError::IdExhausted));
        assert_eq!(storage.product_count(), 1);
        assert_eq!(storage.next_product_id(), i64::MAX);
    }

    #[test]
    fn test_restore_rejects_duplicate_id() {
        let mut storage = MemStorage::new();
        storage.restore_product(snapshot_product(1, "First")).unwrap();

        let result = storage.restore_product(snapshot_product(1, "Second"));
        assert_eq!(result, Err(StorageError::DuplicateId(1)));
        assert_eq!(storage.product_count(), 1);
        assert_eq!(storage.get_product(1).unwrap().name, "First");
    }

    #[test]
    fn test_users() {
        let mut storage = MemStorage::new();
        let alice = storage
            .create_user(NewUser {
                username: "alice".into(),
                password: "secret".into(),
            })
            .unwrap();
        assert_eq!(alice.id, 1);
        assert_eq!(storage.get_user(1), Some(alice.clone()));
        assert_eq!(storage.get_user_by_username("alice"), Some(alice));
        assert_eq!(storage.get_user_by_username("bob"), None);

        // 用户名重复不会被拒绝
        let duplicate = storage
            .create_user(NewUser {
                username: "alice".into(),
                password: "other".into(),
            })
            .unwrap();
        assert_eq!(duplicate.id, 2);
    }
}
