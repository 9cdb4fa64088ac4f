//! PPT Deck Generator Module
//! Builds a PowerPoint deck: a title slide, a slide listing the charts, then
//! one slide per chart image.
//!
//! The package is assembled directly as ZIP + OOXML parts, entirely in memory.

use crate::charts::ChartImage;
use std::io::{self, Cursor, Write};
use thiserror::Error;
use tracing::info;
use zip::write::FileOptions;
use zip::ZipWriter;

/// EMU (English Metric Units) conversion: 914400 EMU = 1 inch
const EMU_PER_INCH: i64 = 914400;
/// 16:9 slide, 13.333 x 7.5 inches
const SLIDE_WIDTH: i64 = 12192000;
const SLIDE_HEIGHT: i64 = 6858000;

const MARGIN: i64 = EMU_PER_INCH / 2;
const HEADING_HEIGHT: i64 = EMU_PER_INCH * 3 / 4;

const LIST_HEADING: &str = "Visualizations";
/// Slide 1 is the title, slide 2 the chart list.
const FIRST_CHART_SLIDE: usize = 3;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("no charts to put in the deck")]
    NoCharts,
    #[error("failed to assemble deck: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("failed to assemble deck: {0}")]
    Io(#[from] io::Error),
}

/// Placement of a shape on a slide, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
}

/// PPT generator for the stock profile deck
pub struct PptGenerator;

impl PptGenerator {
    /// Build the `.pptx` bytes: title slide, chart list, then the charts in order.
    pub fn build_deck(title: &str, subtitle: &str, charts: &[ChartImage]) -> Result<Vec<u8>, DeckError> {
        if charts.is_empty() {
            return Err(DeckError::NoCharts);
        }

        let slide_count = charts.len() + FIRST_CHART_SLIDE - 1;
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(Self::content_types_xml(slide_count).as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(Self::rels_xml().as_bytes())?;

        zip.start_file("ppt/_rels/presentation.xml.rels", options)?;
        zip.write_all(Self::presentation_rels_xml(slide_count).as_bytes())?;

        zip.start_file("ppt/presentation.xml", options)?;
        zip.write_all(Self::presentation_xml(slide_count).as_bytes())?;

        // Title slide
        zip.start_file("ppt/slides/_rels/slide1.xml.rels", options)?;
        zip.write_all(Self::slide_rels_xml(None).as_bytes())?;
        zip.start_file("ppt/slides/slide1.xml", options)?;
        zip.write_all(Self::title_slide_xml(title, subtitle).as_bytes())?;

        // Chart list
        zip.start_file("ppt/slides/_rels/slide2.xml.rels", options)?;
        zip.write_all(Self::slide_rels_xml(None).as_bytes())?;
        zip.start_file("ppt/slides/slide2.xml", options)?;
        let headings: Vec<&str> = charts.iter().map(|c| c.kind.slide_title()).collect();
        zip.write_all(Self::list_slide_xml(LIST_HEADING, &headings).as_bytes())?;

        // Chart slides
        for (idx, chart) in charts.iter().enumerate() {
            let slide_num = idx + FIRST_CHART_SLIDE;
            let image_num = idx + 1;

            zip.start_file(format!("ppt/slides/_rels/slide{}.xml.rels", slide_num), options)?;
            zip.write_all(Self::slide_rels_xml(Some(image_num)).as_bytes())?;

            zip.start_file(format!("ppt/slides/slide{}.xml", slide_num), options)?;
            let frame = Self::fit_picture(chart.width, chart.height);
            zip.write_all(Self::chart_slide_xml(chart.kind.slide_title(), frame).as_bytes())?;

            zip.start_file(format!("ppt/media/image{}.png", image_num), options)?;
            zip.write_all(&chart.png)?;
        }

        zip.start_file("ppt/slideLayouts/slideLayout1.xml", options)?;
        zip.write_all(Self::slide_layout_xml().as_bytes())?;
        zip.start_file("ppt/slideLayouts/_rels/slideLayout1.xml.rels", options)?;
        zip.write_all(Self::layout_rels_xml().as_bytes())?;

        zip.start_file("ppt/slideMasters/slideMaster1.xml", options)?;
        zip.write_all(Self::slide_master_xml().as_bytes())?;
        zip.start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", options)?;
        zip.write_all(Self::master_rels_xml().as_bytes())?;

        zip.start_file("ppt/theme/theme1.xml", options)?;
        zip.write_all(Self::theme_xml().as_bytes())?;

        zip.start_file("docProps/core.xml", options)?;
        zip.write_all(Self::core_props_xml(title).as_bytes())?;
        zip.start_file("docProps/app.xml", options)?;
        zip.write_all(Self::app_props_xml(slide_count).as_bytes())?;

        let bytes = zip.finish()?.into_inner();
        info!(slides = slide_count, charts = charts.len(), bytes = bytes.len(), "assembled deck");
        Ok(bytes)
    }

    /// Largest frame with the image's aspect ratio that fits below the heading, centered.
    fn fit_picture(width: u32, height: u32) -> Frame {
        let top = MARGIN + HEADING_HEIGHT;
        let max_cx = SLIDE_WIDTH - 2 * MARGIN;
        let max_cy = SLIDE_HEIGHT - top - MARGIN;
        let (w, h) = (width.max(1) as i64, height.max(1) as i64);

        let (cx, cy) = if max_cx * h <= max_cy * w {
            (max_cx, max_cx * h / w)
        } else {
            (max_cy * w / h, max_cy)
        };

        Frame {
            x: (SLIDE_WIDTH - cx) / 2,
            y: top,
            cx,
            cy,
        }
    }

    fn content_types_xml(slide_count: usize) -> String {
        let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Default Extension="png" ContentType="image/png"/>
<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#
        .to_string();

        for i in 1..=slide_count {
            xml.push_str(&format!(
                r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                i
            ));
            xml.push('\n');
        }
        xml.push_str("</Types>");
        xml
    }

    fn rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#
    }

    fn presentation_rels_xml(slide_count: usize) -> String {
        let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
"#
        .to_string();

        for i in 1..=slide_count {
            xml.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
                i + 2,
                i
            ));
            xml.push('\n');
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn presentation_xml(slide_count: usize) -> String {
        let slide_ids: String = (1..=slide_count)
            .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + i, i + 2))
            .collect();

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">
<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
<p:sldIdLst>{}</p:sldIdLst>
<p:sldSz cx="{}" cy="{}"/>
<p:notesSz cx="{}" cy="{}"/>
</p:presentation>"#,
            slide_ids, SLIDE_WIDTH, SLIDE_HEIGHT, SLIDE_HEIGHT, SLIDE_WIDTH
        )
    }

    fn slide_rels_xml(image_num: Option<usize>) -> String {
        let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
"#
        .to_string();

        if let Some(num) = image_num {
            xml.push_str(&format!(
                r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image{}.png"/>"#,
                num
            ));
            xml.push('\n');
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn text_box_xml(id: usize, name: &str, frame: Frame, text: &str, size: u32, bold: bool) -> String {
        format!(
            r#"
<p:sp>
<p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>
<p:spPr>
<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>
<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
</p:spPr>
<p:txBody><a:bodyPr wrap="square" anchor="ctr"/><a:lstStyle/><a:p><a:pPr algn="ctr"/><a:r><a:rPr lang="en-US" sz="{sz}" b="{b}"/><a:t>{text}</a:t></a:r></a:p></p:txBody>
</p:sp>"#,
            id = id,
            name = name,
            x = frame.x,
            y = frame.y,
            cx = frame.cx,
            cy = frame.cy,
            sz = size * 100,
            b = u8::from(bold),
            text = escape_xml(text),
        )
    }

    fn picture_xml(id: usize, frame: Frame) -> String {
        format!(
            r#"
<p:pic>
<p:nvPicPr>
<p:cNvPr id="{id}" name="Chart {id}"/>
<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>
<p:nvPr/>
</p:nvPicPr>
<p:blipFill>
<a:blip r:embed="rId2"/>
<a:stretch><a:fillRect/></a:stretch>
</p:blipFill>
<p:spPr>
<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>
<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
</p:spPr>
</p:pic>"#,
            id = id,
            x = frame.x,
            y = frame.y,
            cx = frame.cx,
            cy = frame.cy,
        )
    }

    fn slide_xml(shapes: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld>
<p:spTree>
<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>
{}
</p:spTree>
</p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            shapes
        )
    }

    fn title_slide_xml(title: &str, subtitle: &str) -> String {
        let width = SLIDE_WIDTH - 2 * MARGIN;
        let title_frame = Frame {
            x: MARGIN,
            y: SLIDE_HEIGHT / 3,
            cx: width,
            cy: EMU_PER_INCH * 3 / 2,
        };
        let subtitle_frame = Frame {
            y: title_frame.y + title_frame.cy,
            cy: EMU_PER_INCH,
            ..title_frame
        };

        let mut shapes = Self::text_box_xml(2, "Title", title_frame, title, 44, true);
        shapes.push_str(&Self::text_box_xml(3, "Subtitle", subtitle_frame, subtitle, 24, false));
        Self::slide_xml(&shapes)
    }

    fn list_box_xml(id: usize, frame: Frame, lines: &[&str]) -> String {
        let paragraphs: String = lines
            .iter()
            .map(|line| {
                format!(
                    r#"<a:p><a:pPr marL="342900" indent="-342900"><a:buChar char="&#8226;"/></a:pPr><a:r><a:rPr lang="en-US" sz="2400"/><a:t>{}</a:t></a:r></a:p>"#,
                    escape_xml(line)
                )
            })
            .collect();

        format!(
            r#"
<p:sp>
<p:nvSpPr><p:cNvPr id="{id}" name="Chart List"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>
<p:spPr>
<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>
<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
</p:spPr>
<p:txBody><a:bodyPr wrap="square"/><a:lstStyle/>{paragraphs}</p:txBody>
</p:sp>"#,
            id = id,
            x = frame.x,
            y = frame.y,
            cx = frame.cx,
            cy = frame.cy,
            paragraphs = paragraphs,
        )
    }

    fn list_slide_xml(heading: &str, lines: &[&str]) -> String {
        let heading_frame = Frame {
            x: MARGIN,
            y: MARGIN / 2,
            cx: SLIDE_WIDTH - 2 * MARGIN,
            cy: HEADING_HEIGHT,
        };
        let list_frame = Frame {
            x: MARGIN * 2,
            y: MARGIN + HEADING_HEIGHT,
            cx: SLIDE_WIDTH - 4 * MARGIN,
            cy: SLIDE_HEIGHT - 2 * MARGIN - HEADING_HEIGHT,
        };

        let mut shapes = Self::text_box_xml(2, "Heading", heading_frame, heading, 32, true);
        shapes.push_str(&Self::list_box_xml(3, list_frame, lines));
        Self::slide_xml(&shapes)
    }

    fn chart_slide_xml(heading: &str, picture: Frame) -> String {
        let heading_frame = Frame {
            x: MARGIN,
            y: MARGIN / 2,
            cx: SLIDE_WIDTH - 2 * MARGIN,
            cy: HEADING_HEIGHT,
        };

        let mut shapes = Self::text_box_xml(2, "Heading", heading_frame, heading, 28, true);
        shapes.push_str(&Self::picture_xml(3, picture));
        Self::slide_xml(&shapes)
    }

    fn slide_layout_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">
<p:cSld name="Blank"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#
    }

    fn layout_rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#
    }

    fn slide_master_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld>
<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>
</p:sldMaster>"#
    }

    fn master_rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>
</Relationships>"#
    }

    fn theme_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Stock Profile">
<a:themeElements>
<a:clrScheme name="Stock Profile"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="221F1F"/></a:dk2><a:lt2><a:srgbClr val="F5F5F1"/></a:lt2><a:accent1><a:srgbClr val="4C72B0"/></a:accent1><a:accent2><a:srgbClr val="DD8452"/></a:accent2><a:accent3><a:srgbClr val="55A868"/></a:accent3><a:accent4><a:srgbClr val="C44E52"/></a:accent4><a:accent5><a:srgbClr val="8172B3"/></a:accent5><a:accent6><a:srgbClr val="937860"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme>
<a:fontScheme name="Stock Profile"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme>
<a:fmtScheme name="Stock Profile"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme>
</a:themeElements>
<a:objectDefaults/>
<a:extraClrSchemeLst/>
</a:theme>"#
    }

    fn core_props_xml(title: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<dc:title>{}</dc:title>
<dc:creator>Stock Profile</dc:creator>
<cp:revision>1</cp:revision>
</cp:coreProperties>"#,
            escape_xml(title)
        )
    }

    fn app_props_xml(slide_count: usize) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
<Application>Stock Profile</Application>
<PresentationFormat>On-screen Show (16:9)</PresentationFormat>
<Slides>{}</Slides>
</Properties>"#,
            slide_count
        )
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;
    use std::io::Read;
    use zip::ZipArchive;

    fn chart(kind: ChartKind) -> ChartImage {
        ChartImage {
            kind,
            width: 1400,
            height: 800,
            png: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[test]
    fn escapes_markup_in_titles() {
        assert_eq!(escape_xml("Revenue & <Earnings>"), "Revenue &amp; &lt;Earnings&gt;");
    }

    #[test]
    fn picture_keeps_aspect_and_fits() {
        let frame = PptGenerator::fit_picture(1400, 800);
        assert!(frame.x >= MARGIN && frame.x + frame.cx <= SLIDE_WIDTH - MARGIN);
        assert!(frame.y + frame.cy <= SLIDE_HEIGHT - MARGIN);
        let ratio = frame.cx as f64 / frame.cy as f64;
        assert!((ratio - 1.75).abs() < 0.01);
    }

    #[test]
    fn deck_has_title_list_and_one_slide_per_chart() {
        let charts = [
            chart(ChartKind::QuarterlyDistribution),
            chart(ChartKind::RevenueAndEarnings),
        ];
        let bytes = PptGenerator::build_deck("Netflix & Co", "2017", &charts).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        for name in [
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/slide3.xml",
            "ppt/slides/slide4.xml",
            "ppt/media/image1.png",
            "ppt/media/image2.png",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing {name}");
        }
        assert!(archive.by_name("ppt/slides/slide5.xml").is_err());

        let mut title_slide = String::new();
        archive
            .by_name("ppt/slides/slide1.xml")
            .unwrap()
            .read_to_string(&mut title_slide)
            .unwrap();
        assert!(title_slide.contains("Netflix &amp; Co"));

        let mut list_slide = String::new();
        archive
            .by_name("ppt/slides/slide2.xml")
            .unwrap()
            .read_to_string(&mut list_slide)
            .unwrap();
        assert!(list_slide.contains(LIST_HEADING));
        let first = list_slide
            .find(ChartKind::QuarterlyDistribution.slide_title())
            .unwrap();
        let second = list_slide
            .find(ChartKind::RevenueAndEarnings.slide_title())
            .unwrap();
        assert!(first < second);
        assert!(!list_slide.contains(ChartKind::EarningsComparison.slide_title()));

        let mut chart_slide = String::new();
        archive
            .by_name("ppt/slides/slide4.xml")
            .unwrap()
            .read_to_string(&mut chart_slide)
            .unwrap();
        assert!(chart_slide.contains(ChartKind::RevenueAndEarnings.slide_title()));
        assert!(chart_slide.contains(r#"r:embed="rId2""#));
    }

    #[test]
    fn empty_deck_is_refused() {
        assert!(matches!(
            PptGenerator::build_deck("t", "s", &[]),
            Err(DeckError::NoCharts)
        ));
    }
}
