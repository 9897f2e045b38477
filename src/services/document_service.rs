// src/services/document_service.rs

use std::path::{Path, PathBuf};

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{record::Record, sales::Quotation},
    services::sales_service::SalesService,
};

fn pdf_error(e: impl std::fmt::Display) -> AppError {
    AppError::PdfError(e.to_string())
}

#[derive(Clone)]
pub struct DocumentService {
    sales: SalesService,
    fonts_dir: PathBuf,
    font_family: String,
    company_name: String,
}

impl DocumentService {
    pub fn new(
        sales: SalesService,
        fonts_dir: PathBuf,
        font_family: String,
        company_name: String,
    ) -> Self {
        Self {
            sales,
            fonts_dir,
            font_family,
            company_name,
        }
    }

    /// PDF da cotação, com QR code do número para conferência.
    pub async fn quotation_pdf(&self, id: Uuid) -> Result<Vec<u8>, AppError> {
        let quotation = self.sales.get_quotation(id).await?;
        let fonts_dir = self.fonts_dir.clone();
        let font_family = self.font_family.clone();
        let company_name = self.company_name.clone();

        // Layout e compressão do PDF rodam fora do runtime
        tokio::task::spawn_blocking(move || {
            render_quotation(&fonts_dir, &font_family, &company_name, &quotation)
        })
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task do PDF: {}", e))?
    }
}

fn render_quotation(
    fonts_dir: &Path,
    font_family: &str,
    company_name: &str,
    record: &Record<Quotation>,
) -> Result<Vec<u8>, AppError> {
    let quotation = &record.data;

    // Carrega a fonte da pasta configurada
    let fonts = genpdf::fonts::from_files(fonts_dir, font_family, None)
        .map_err(|_| AppError::FontNotFound(fonts_dir.display().to_string()))?;

    let mut doc = genpdf::Document::new(fonts);
    doc.set_title(format!("Quotation {}", quotation.quotation_number));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // --- CABEÇALHO ---
    doc.push(
        elements::Paragraph::new(company_name.to_string())
            .styled(style::Style::new().bold().with_font_size(18)),
    );
    doc.push(elements::Break::new(1.5));

    doc.push(
        elements::Paragraph::new(format!("QUOTATION {}", quotation.quotation_number))
            .styled(style::Style::new().bold().with_font_size(14)),
    );
    doc.push(elements::Paragraph::new(format!(
        "Date: {}",
        record.created_at.format("%d/%m/%Y")
    )));

    let customer = &quotation.customer;
    doc.push(elements::Paragraph::new(format!("Customer: {}", customer.customer_name)));
    for line in [&customer.email, &customer.phone, &customer.address, &customer.state]
        .into_iter()
        .flatten()
    {
        doc.push(elements::Paragraph::new(line.clone()).styled(style::Style::new().with_font_size(10)));
    }

    doc.push(elements::Break::new(2));

    // --- TABELA DE ITENS ---
    // Pesos: Item (4), Qtd (1), Preço (2), Desc % (1), Imp % (1), Subtotal (2)
    let mut table = elements::TableLayout::new(vec![4, 1, 2, 1, 1, 2]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let bold = style::Style::new().bold();
    table
        .row()
        .element(elements::Paragraph::new("Item").styled(bold))
        .element(elements::Paragraph::new("Qty").styled(bold))
        .element(elements::Paragraph::new("Price").styled(bold))
        .element(elements::Paragraph::new("Disc %").styled(bold))
        .element(elements::Paragraph::new("Tax %").styled(bold))
        .element(elements::Paragraph::new("Subtotal").styled(bold))
        .push()
        .map_err(pdf_error)?;

    for item in &quotation.items {
        let qty = match &item.unit {
            Some(unit) => format!("{} {}", item.qty, unit),
            None => item.qty.to_string(),
        };
        table
            .row()
            .element(elements::Paragraph::new(item.item_name.clone()))
            .element(elements::Paragraph::new(qty))
            .element(elements::Paragraph::new(format!("{:.2}", item.price)))
            .element(elements::Paragraph::new(item.discount.to_string()))
            .element(elements::Paragraph::new(item.tax.to_string()))
            .element(elements::Paragraph::new(format!("{:.2}", item.subtotal)))
            .push()
            .map_err(pdf_error)?;
    }

    doc.push(table);
    doc.push(elements::Break::new(2));

    // --- TOTAL ---
    let mut total = elements::Paragraph::new(format!("TOTAL: {:.2}", quotation.total_amount));
    total.set_alignment(genpdf::Alignment::Right);
    doc.push(total.styled(style::Style::new().bold().with_font_size(12)));
    doc.push(elements::Break::new(2));

    // --- QR CODE DO NÚMERO ---
    let code = QrCode::new(quotation.quotation_number.as_bytes()).map_err(pdf_error)?;
    let image_buffer = code.render::<Luma<u8>>().build();
    let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);
    let pdf_image = elements::Image::from_dynamic_image(dynamic_image)
        .map_err(pdf_error)?
        .with_scale(genpdf::Scale::new(0.5, 0.5));
    doc.push(pdf_image);

    // Renderiza para Buffer (Memória)
    let mut buffer = Vec::new();
    doc.render(&mut buffer).map_err(pdf_error)?;

    tracing::info!(
        quotation_number = %quotation.quotation_number,
        bytes = buffer.len(),
        "PDF da cotação gerado"
    );
    Ok(buffer)
}
