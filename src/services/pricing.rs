// src/services/pricing.rs

use rust_decimal::{Decimal, RoundingStrategy};
use validator::Validate;

use crate::{
    common::error::AppError,
    models::sales::{LineItem, LineItemInput},
};

// Diferença máxima aceita entre o valor enviado pelo cliente e o recalculado
fn tolerance() -> Decimal {
    Decimal::new(1, 2)
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// (price × qty), menos o desconto percentual, mais o imposto percentual
/// sobre o valor já descontado. Arredondado para 2 casas.
/// `None` quando o resultado não cabe em um `Decimal`.
pub fn line_subtotal(
    qty: Decimal,
    price: Decimal,
    discount: Decimal,
    tax: Decimal,
) -> Option<Decimal> {
    let amount = price.checked_mul(qty)?;
    let discount_amount = amount.checked_mul(discount)?.checked_div(Decimal::ONE_HUNDRED)?;
    let discounted = amount.checked_sub(discount_amount)?;
    let tax_amount = discounted.checked_mul(tax)?.checked_div(Decimal::ONE_HUNDRED)?;
    discounted.checked_add(tax_amount).map(round2)
}

fn out_of_range(what: String) -> AppError {
    AppError::InvalidInput(format!("{} amount out of range", what))
}

/// Valida os itens, recalcula subtotais e total. Valores enviados pelo
/// cliente (subtotal por item, total geral) só servem para conferência.
pub fn price_items(
    items: &[LineItemInput],
    claimed_total: Option<Decimal>,
    min_qty: Decimal,
) -> Result<(Vec<LineItem>, Decimal), AppError> {
    let mut priced = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        item.validate()?;

        if item.qty < min_qty {
            return Err(AppError::InvalidInput(format!(
                "items[{}].qty must be at least {}",
                i, min_qty
            )));
        }
        if item.price < Decimal::ZERO {
            return Err(AppError::InvalidInput(format!("items[{}].price must not be negative", i)));
        }
        if item.discount < Decimal::ZERO || item.discount > Decimal::ONE_HUNDRED {
            return Err(AppError::InvalidInput(format!(
                "items[{}].discount must be between 0 and 100",
                i
            )));
        }
        if item.tax < Decimal::ZERO {
            return Err(AppError::InvalidInput(format!("items[{}].tax must not be negative", i)));
        }

        let subtotal = line_subtotal(item.qty, item.price, item.discount, item.tax)
            .ok_or_else(|| out_of_range(format!("items[{}]", i)))?;
        if let Some(claimed) = item.subtotal {
            if (claimed - subtotal).abs() > tolerance() {
                return Err(AppError::InvalidInput(format!(
                    "items[{}].subtotal {} does not match computed {}",
                    i, claimed, subtotal
                )));
            }
        }

        priced.push(LineItem {
            item_name: item.item_name.trim().to_string(),
            qty: item.qty,
            unit: item.unit.clone(),
            price: item.price,
            discount: item.discount,
            tax: item.tax,
            subtotal,
        });
    }

    let total = priced
        .iter()
        .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.subtotal))
        .ok_or_else(|| out_of_range("totalAmount".to_string()))?;

    if let Some(claimed) = claimed_total {
        if (claimed - total).abs() > tolerance() {
            return Err(AppError::InvalidInput(format!(
                "totalAmount {} does not match computed {}",
                claimed, total
            )));
        }
    }

    Ok((priced, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(qty: i64, price: i64, discount: i64, tax: i64) -> LineItemInput {
        LineItemInput {
            item_name: "Chair".into(),
            qty: Decimal::from(qty),
            unit: Some("pcs".into()),
            price: Decimal::from(price),
            discount: Decimal::from(discount),
            tax: Decimal::from(tax),
            subtotal: None,
        }
    }

    #[test]
    fn discount_then_tax() {
        // 200 - 10% = 180, + 5% = 189
        let subtotal = line_subtotal(
            Decimal::from(2),
            Decimal::from(100),
            Decimal::from(10),
            Decimal::from(5),
        );
        assert_eq!(subtotal, Some(Decimal::new(18900, 2)));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 0.125 -> 0.13
        let subtotal = line_subtotal(
            Decimal::ONE,
            Decimal::new(125, 3),
            Decimal::ZERO,
            Decimal::ZERO,
        );
        assert_eq!(subtotal, Some(Decimal::new(13, 2)));
    }

    #[test]
    fn totals_are_summed_from_items() {
        let (items, total) =
            price_items(&[item(3, 50, 0, 18), item(2, 100, 10, 5)], None, Decimal::ZERO).unwrap();
        assert_eq!(items[0].subtotal, Decimal::from(177));
        assert_eq!(total, Decimal::from(366));
    }

    #[test]
    fn claimed_values_within_a_cent_are_accepted() {
        let mut input = item(3, 50, 0, 18);
        input.subtotal = Some(Decimal::new(17699, 2));
        let result = price_items(&[input], Some(Decimal::new(17701, 2)), Decimal::ZERO);
        assert!(result.is_ok());
    }

    #[test]
    fn tampered_total_is_rejected() {
        let err = price_items(&[item(3, 50, 0, 18)], Some(Decimal::from(10)), Decimal::ZERO)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(price_items(&[item(1, 10, 101, 0)], None, Decimal::ZERO).is_err());
        assert!(price_items(&[item(1, -1, 0, 0)], None, Decimal::ZERO).is_err());
        assert!(price_items(&[item(1, 10, 0, -5)], None, Decimal::ZERO).is_err());
        // Pedidos exigem qty >= 1
        assert!(price_items(&[item(0, 10, 0, 0)], None, Decimal::ONE).is_err());
    }

    #[test]
    fn huge_amounts_are_rejected_instead_of_overflowing() {
        // 1e28 chega pelo serde-float sem erro; o produto não cabe em um Decimal
        let mut input: LineItemInput =
            serde_json::from_value(serde_json::json!({"itemName": "Servidor", "qty": 10, "price": 1e28}))
                .unwrap();
        assert_eq!(input.price, Decimal::from_str_exact("10000000000000000000000000000").unwrap());
        assert_eq!(line_subtotal(input.qty, input.price, input.discount, input.tax), None);

        let err = price_items(&[input.clone()], None, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg.contains("items[0]")));

        // Cada item cabe, a soma não
        input.qty = Decimal::from(7);
        let err = price_items(&[input.clone(), input], None, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg.contains("totalAmount")));
    }

    #[test]
    fn blank_item_name_is_a_validation_error() {
        let mut input = item(1, 10, 0, 0);
        input.item_name = "  ".into();
        let err = price_items(&[input], None, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
