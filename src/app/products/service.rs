//! 产品业务服务

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::model::{NewProduct, Product, ProductId, ProductPatch};
use crate::core::error::CoreError;
use crate::infrastructure::storage::MemStorage;

/// 对存储的共享访问，每次调用只持有一次锁
#[derive(Clone)]
pub struct ProductService {
    storage: Arc<RwLock<MemStorage>>,
}

impl ProductService {
    pub fn new(storage: MemStorage) -> Self {
        Self {
            storage: Arc::new(RwLock::new(storage)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemStorage>, CoreError> {
        self.storage
            .read()
            .map_err(|_| CoreError::InternalServerError("存储读锁已中毒".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemStorage>, CoreError> {
        self.storage
            .write()
            .map_err(|_| CoreError::InternalServerError("存储写锁已中毒".to_string()))
    }

    pub fn product_count(&self) -> Result<usize, CoreError> {
        Ok(self.read()?.product_count())
    }

    pub fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.read()?.get_all_products())
    }

    pub fn products_by_category(&self, category: &str) -> Result<Vec<Product>, CoreError> {
        Ok(self.read()?.get_products_by_category(category))
    }

    pub fn featured_products(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.read()?.get_featured_products())
    }

    pub fn new_arrivals(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.read()?.get_new_arrivals())
    }

    pub fn search_products(&self, query: &str) -> Result<Vec<Product>, CoreError> {
        Ok(self.read()?.search_products(query))
    }

    pub fn get_product(&self, id: ProductId) -> Result<Product, CoreError> {
        self.read()?
            .get_product(id)
            .ok_or_else(CoreError::product_not_found)
    }

    pub fn create_product(&self, input: NewProduct) -> Result<Product, CoreError> {
        Ok(self.write()?.create_product(input)?)
    }

    pub fn update_product(&self, id: ProductId, patch: ProductPatch) -> Result<Product, CoreError> {
        self.write()?
            .update_product(id, patch)
            .ok_or_else(CoreError::product_not_found)
    }

    pub fn delete_product(&self, id: ProductId) -> Result<(), CoreError> {
        if self.write()?.delete_product(id) {
            Ok(())
        } else {
            Err(CoreError::product_not_found())
        }
    }
}
