use async_trait::async_trait;

use crate::{
    db::db::DBClient, dtos::leaddtos::PortfolioRequestDto, models::leadmodel::PortfolioRequest,
};

#[async_trait]
pub trait PortfolioRequestExt {
    async fn create_portfolio_request(
        &self,
        data: &PortfolioRequestDto,
    ) -> Result<PortfolioRequest, sqlx::Error>;
}

#[async_trait]
impl PortfolioRequestExt for DBClient {
    async fn create_portfolio_request(
        &self,
        data: &PortfolioRequestDto,
    ) -> Result<PortfolioRequest, sqlx::Error> {
        let request = sqlx::query_as::<_, PortfolioRequest>(
            r#"
            INSERT INTO portfolio_requests (
                name, email, phone, buyer_or_seller, budget,
                preferred_areas, type_of_home, timeline, locale
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.buyer_or_seller)
        .bind(&data.budget)
        .bind(&data.preferred_areas)
        .bind(&data.type_of_home)
        .bind(&data.timeline)
        .bind(&data.locale)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }
}
