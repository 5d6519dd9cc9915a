use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::{BufRead, Cursor};

use crate::error::ExtractError;
use crate::mzml::structs::*;

fn xml_err(e: impl std::fmt::Display) -> ExtractError {
    ExtractError::MalformedDocument(e.to_string())
}

fn get_attr_any(start: &BytesStart, names: &[&[u8]]) -> Option<String> {
    for a in start.attributes().with_checks(false).flatten() {
        let key = a.key.as_ref();
        if names.iter().any(|n| *n == key) {
            return a.unescape_value().ok().map(|v| v.to_string());
        }
    }
    None
}

fn get_attr(start: &BytesStart, name: &[u8]) -> Option<String> {
    get_attr_any(start, &[name])
}

fn get_attr_u32(start: &BytesStart, name: &[u8]) -> Option<u32> {
    get_attr(start, name).and_then(|s| s.parse().ok())
}

fn get_attr_usize(start: &BytesStart, name: &[u8]) -> Option<usize> {
    get_attr(start, name).and_then(|s| s.parse().ok())
}

fn parse_cv_param(start: &BytesStart) -> CvParam {
    CvParam {
        cv_ref: get_attr_any(start, &[b"cvRef", b"cvLabel"]),
        accession: get_attr(start, b"accession"),
        name: get_attr(start, b"name").unwrap_or_default(),
        value: get_attr(start, b"value"),
        unit_cv_ref: get_attr_any(start, &[b"unitCvRef", b"unitCvLabel"]),
        unit_name: get_attr(start, b"unitName"),
        unit_accession: get_attr(start, b"unitAccession"),
    }
}

fn parse_user_param(start: &BytesStart) -> UserParam {
    UserParam {
        name: get_attr(start, b"name").unwrap_or_default(),
        r#type: get_attr(start, b"type"),
        unit_accession: get_attr(start, b"unitAccession"),
        unit_cv_ref: get_attr_any(start, &[b"unitCvRef", b"unitCvLabel"]),
        unit_name: get_attr(start, b"unitName"),
        value: get_attr(start, b"value"),
    }
}

fn skip_element<R: BufRead>(reader: &mut Reader<R>, end: &[u8]) -> Result<(), ExtractError> {
    let mut depth = 1usize;
    let mut buf = Vec::with_capacity(512);

    while depth != 0 {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(_) => depth += 1,
            Event::End(e) => {
                if depth == 1 && e.name().as_ref() == end {
                    break;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(())
}

fn read_text_content<R: BufRead>(
    reader: &mut Reader<R>,
    end: &[u8],
) -> Result<String, ExtractError> {
    let mut buf = Vec::with_capacity(512);
    let mut out = String::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Text(t) => out.push_str(&t.decode().map_err(xml_err)?),
            Event::CData(t) => out.push_str(&String::from_utf8_lossy(&t.into_inner())),
            Event::End(e) if e.name().as_ref() == end => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

fn push_params_empty(e: &BytesStart, cv_params: &mut Vec<CvParam>, user_params: &mut Vec<UserParam>) -> bool {
    match e.name().as_ref() {
        b"cvParam" => {
            cv_params.push(parse_cv_param(e));
            true
        }
        b"userParam" => {
            user_params.push(parse_user_param(e));
            true
        }
        _ => false,
    }
}

fn push_params_start<R: BufRead>(
    reader: &mut Reader<R>,
    e: &BytesStart,
    cv_params: &mut Vec<CvParam>,
    user_params: &mut Vec<UserParam>,
) -> Result<bool, ExtractError> {
    match e.name().as_ref() {
        b"cvParam" => {
            cv_params.push(parse_cv_param(e));
            skip_element(reader, b"cvParam")?;
            Ok(true)
        }
        b"userParam" => {
            user_params.push(parse_user_param(e));
            skip_element(reader, b"userParam")?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// <mzML>
///
/// An `indexedmzML` wrapper is tolerated; everything outside `<mzML>` is
/// ignored, and within it only `<run>` is materialized.
pub fn parse_mzml(bytes: &[u8]) -> Result<MzML, ExtractError> {
    let mut reader = Reader::from_reader(Cursor::new(bytes));
    reader.config_mut().trim_text(true);

    let mut buf = Vec::with_capacity(1024);
    let mut mzml = MzML::default();
    let mut in_mzml = false;

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) => {
                if e.name().as_ref() == b"mzML" {
                    in_mzml = true;
                    mzml.id = get_attr(&e, b"id");
                    mzml.version = get_attr(&e, b"version");
                    buf.clear();
                    continue;
                }
                if !in_mzml {
                    if e.name().as_ref() != b"indexedmzML" {
                        skip_element(&mut reader, e.name().as_ref())?;
                    }
                    buf.clear();
                    continue;
                }
                match e.name().as_ref() {
                    b"run" => mzml.run = parse_run(&mut reader, &e)?,
                    _ => skip_element(&mut reader, e.name().as_ref())?,
                }
            }
            Event::End(e) if e.name().as_ref() == b"mzML" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !in_mzml {
        return Err(ExtractError::MalformedDocument(
            "no <mzML> element found".to_string(),
        ));
    }

    Ok(mzml)
}

/// <run>
fn parse_run<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Run, ExtractError> {
    let mut run = Run {
        id: get_attr(start, b"id").unwrap_or_default(),
        start_time_stamp: get_attr(start, b"startTimeStamp"),
        default_instrument_configuration_ref: get_attr(start, b"defaultInstrumentConfigurationRef"),
        ..Default::default()
    };

    let mut buf = Vec::with_capacity(1024);
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) => match e.name().as_ref() {
                b"spectrumList" => run.spectrum_list = Some(parse_spectrum_list(reader, &e)?),
                b"chromatogramList" => {
                    run.chromatogram_list = Some(parse_chromatogram_list(reader, &e)?)
                }
                _ => skip_element(reader, e.name().as_ref())?,
            },
            Event::End(e) if e.name().as_ref() == b"run" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(run)
}

/// <spectrumList>
fn parse_spectrum_list<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<SpectrumList, ExtractError> {
    let mut list = SpectrumList {
        count: get_attr_usize(start, b"count"),
        default_data_processing_ref: get_attr(start, b"defaultDataProcessingRef"),
        ..Default::default()
    };

    let mut buf = Vec::with_capacity(1024);
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) => {
                if e.name().as_ref() == b"spectrum" {
                    list.spectra.push(parse_spectrum(reader, &e)?);
                } else {
                    skip_element(reader, e.name().as_ref())?;
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"spectrum" => {
                list.spectra.push(Spectrum {
                    id: get_attr(&e, b"id").unwrap_or_default(),
                    index: get_attr_u32(&e, b"index"),
                    default_array_length: get_attr_usize(&e, b"defaultArrayLength"),
                    ..Default::default()
                });
            }
            Event::End(e) if e.name().as_ref() == b"spectrumList" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(list)
}

/// <spectrum>
fn parse_spectrum<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<Spectrum, ExtractError> {
    let mut spectrum = Spectrum {
        id: get_attr(start, b"id").unwrap_or_default(),
        index: get_attr_u32(start, b"index"),
        default_array_length: get_attr_usize(start, b"defaultArrayLength"),
        ..Default::default()
    };

    let mut buf = Vec::with_capacity(1024);
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Empty(e) => {
                push_params_empty(&e, &mut spectrum.cv_params, &mut spectrum.user_params);
            }
            Event::Start(e) => {
                if !push_params_start(reader, &e, &mut spectrum.cv_params, &mut spectrum.user_params)? {
                    match e.name().as_ref() {
                        b"scanList" => spectrum.scan_list = Some(parse_scan_list(reader, &e)?),
                        b"precursorList" => {
                            spectrum.precursor_list = Some(parse_precursor_list(reader, &e)?)
                        }
                        b"binaryDataArrayList" => {
                            spectrum.binary_data_array_list =
                                Some(parse_binary_data_array_list(reader, &e)?)
                        }
                        _ => skip_element(reader, e.name().as_ref())?,
                    }
                }
            }
            Event::End(e) if e.name().as_ref() == b"spectrum" => break,
            Event::Eof => {
                return Err(ExtractError::MalformedDocument(
                    "unexpected EOF while parsing <spectrum>".to_string(),
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(spectrum)
}

/// <scanList>
fn parse_scan_list<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<ScanList, ExtractError> {
    let mut list = ScanList {
        count: get_attr_usize(start, b"count"),
        ..Default::default()
    };

    let mut user_params = Vec::new();
    let mut buf = Vec::with_capacity(1024);
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Empty(e) => {
                push_params_empty(&e, &mut list.cv_params, &mut user_params);
            }
            Event::Start(e) => {
                if e.name().as_ref() == b"scan" {
                    list.scans.push(parse_scan(reader, &e)?);
                } else if !push_params_start(reader, &e, &mut list.cv_params, &mut user_params)? {
                    skip_element(reader, e.name().as_ref())?;
                }
            }
            Event::End(e) if e.name().as_ref() == b"scanList" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(list)
}

/// <scan>
fn parse_scan<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Scan, ExtractError> {
    let mut scan = Scan {
        instrument_configuration_ref: get_attr(start, b"instrumentConfigurationRef"),
        ..Default::default()
    };

    let mut buf = Vec::with_capacity(1024);
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Empty(e) => {
                push_params_empty(&e, &mut scan.cv_params, &mut scan.user_params);
            }
            Event::Start(e) => {
                if !push_params_start(reader, &e, &mut scan.cv_params, &mut scan.user_params)? {
                    match e.name().as_ref() {
                        b"scanWindowList" => {
                            scan.scan_window_list = Some(parse_scan_window_list(reader, &e)?)
                        }
                        _ => skip_element(reader, e.name().as_ref())?,
                    }
                }
            }
            Event::End(e) if e.name().as_ref() == b"scan" => break,
            Event::Eof => {
                return Err(ExtractError::MalformedDocument(
                    "unexpected EOF while parsing <scan>".to_string(),
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(scan)
}

/// <scanWindowList>
fn parse_scan_window_list<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<ScanWindowList, ExtractError> {
    let mut list = ScanWindowList {
        count: get_attr_usize(start, b"count"),
        ..Default::default()
    };

    let mut buf = Vec::with_capacity(512);
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) => {
                if e.name().as_ref() == b"scanWindow" {
                    list.scan_windows.push(parse_scan_window(reader, &e)?);
                } else {
                    skip_element(reader, e.name().as_ref())?;
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"scanWindow" => {
                list.scan_windows.push(ScanWindow::default());
            }
            Event::End(e) if e.name().as_ref() == b"scanWindowList" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(list)
}

/// <scanWindow>
fn parse_scan_window<R: BufRead>(
    reader: &mut Reader<R>,
    _start: &BytesStart,
) -> Result<ScanWindow, ExtractError> {
    let mut w = ScanWindow::default();
    let mut buf = Vec::with_capacity(512);

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Empty(e) => {
                push_params_empty(&e, &mut w.cv_params, &mut w.user_params);
            }
            Event::Start(e) => {
                if !push_params_start(reader, &e, &mut w.cv_params, &mut w.user_params)? {
                    skip_element(reader, e.name().as_ref())?;
                }
            }
            Event::End(e) if e.name().as_ref() == b"scanWindow" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(w)
}

/// <precursorList>
fn parse_precursor_list<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<PrecursorList, ExtractError> {
    let mut list = PrecursorList {
        count: get_attr_usize(start, b"count"),
        ..Default::default()
    };

    let mut buf = Vec::with_capacity(1024);
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) => {
                if e.name().as_ref() == b"precursor" {
                    list.precursors.push(parse_precursor(reader, &e)?);
                } else {
                    skip_element(reader, e.name().as_ref())?;
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"precursor" => {
                list.precursors.push(Precursor {
                    spectrum_ref: get_attr(&e, b"spectrumRef"),
                    ..Default::default()
                });
            }
            Event::End(e) if e.name().as_ref() == b"precursorList" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(list)
}

/// <precursor>
fn parse_precursor<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<Precursor, ExtractError> {
    let mut p = Precursor {
        spectrum_ref: get_attr(start, b"spectrumRef"),
        ..Default::default()
    };

    let mut buf = Vec::with_capacity(1024);
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) => match e.name().as_ref() {
                b"isolationWindow" => {
                    p.isolation_window = Some(parse_isolation_window(reader, &e)?)
                }
                b"selectedIonList" => {
                    p.selected_ion_list = Some(parse_selected_ion_list(reader, &e)?)
                }
                b"activation" => p.activation = Some(parse_activation(reader, &e)?),
                _ => skip_element(reader, e.name().as_ref())?,
            },
            Event::End(e) if e.name().as_ref() == b"precursor" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(p)
}

/// <product>
fn parse_product<R: BufRead>(
    reader: &mut Reader<R>,
    _start: &BytesStart,
) -> Result<Product, ExtractError> {
    let mut p = Product::default();

    let mut buf = Vec::with_capacity(512);
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) => match e.name().as_ref() {
                b"isolationWindow" => {
                    p.isolation_window = Some(parse_isolation_window(reader, &e)?)
                }
                _ => skip_element(reader, e.name().as_ref())?,
            },
            Event::End(e) if e.name().as_ref() == b"product" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(p)
}

/// <isolationWindow>
fn parse_isolation_window<R: BufRead>(
    reader: &mut Reader<R>,
    _start: &BytesStart,
) -> Result<IsolationWindow, ExtractError> {
    let mut w = IsolationWindow::default();
    let mut user_params = Vec::new();
    let mut buf = Vec::with_capacity(512);

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Empty(e) => {
                push_params_empty(&e, &mut w.cv_params, &mut user_params);
            }
            Event::Start(e) => {
                if !push_params_start(reader, &e, &mut w.cv_params, &mut user_params)? {
                    skip_element(reader, e.name().as_ref())?;
                }
            }
            Event::End(e) if e.name().as_ref() == b"isolationWindow" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(w)
}

/// <selectedIonList>
fn parse_selected_ion_list<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<SelectedIonList, ExtractError> {
    let mut list = SelectedIonList {
        count: get_attr_usize(start, b"count"),
        ..Default::default()
    };

    let mut buf = Vec::with_capacity(512);
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) => {
                if e.name().as_ref() == b"selectedIon" {
                    list.selected_ions.push(parse_selected_ion(reader, &e)?);
                } else {
                    skip_element(reader, e.name().as_ref())?;
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"selectedIon" => {
                list.selected_ions.push(SelectedIon::default());
            }
            Event::End(e) if e.name().as_ref() == b"selectedIonList" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(list)
}

/// <selectedIon>
fn parse_selected_ion<R: BufRead>(
    reader: &mut Reader<R>,
    _start: &BytesStart,
) -> Result<SelectedIon, ExtractError> {
    let mut ion = SelectedIon::default();
    let mut user_params = Vec::new();
    let mut buf = Vec::with_capacity(512);

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Empty(e) => {
                push_params_empty(&e, &mut ion.cv_params, &mut user_params);
            }
            Event::Start(e) => {
                if !push_params_start(reader, &e, &mut ion.cv_params, &mut user_params)? {
                    skip_element(reader, e.name().as_ref())?;
                }
            }
            Event::End(e) if e.name().as_ref() == b"selectedIon" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(ion)
}

/// <activation>
fn parse_activation<R: BufRead>(
    reader: &mut Reader<R>,
    _start: &BytesStart,
) -> Result<Activation, ExtractError> {
    let mut a = Activation::default();
    let mut user_params = Vec::new();
    let mut buf = Vec::with_capacity(512);

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Empty(e) => {
                push_params_empty(&e, &mut a.cv_params, &mut user_params);
            }
            Event::Start(e) => {
                if !push_params_start(reader, &e, &mut a.cv_params, &mut user_params)? {
                    skip_element(reader, e.name().as_ref())?;
                }
            }
            Event::End(e) if e.name().as_ref() == b"activation" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(a)
}

/// <binaryDataArrayList>
fn parse_binary_data_array_list<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<BinaryDataArrayList, ExtractError> {
    let mut list = BinaryDataArrayList {
        count: get_attr_usize(start, b"count"),
        ..Default::default()
    };

    let mut buf = Vec::with_capacity(1024);
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) => {
                if e.name().as_ref() == b"binaryDataArray" {
                    list.binary_data_arrays
                        .push(parse_binary_data_array(reader, &e)?);
                } else {
                    skip_element(reader, e.name().as_ref())?;
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"binaryDataArray" => {
                list.binary_data_arrays.push(BinaryDataArray {
                    array_length: get_attr_usize(&e, b"arrayLength"),
                    encoded_length: get_attr_usize(&e, b"encodedLength"),
                    ..Default::default()
                });
            }
            Event::End(e) if e.name().as_ref() == b"binaryDataArrayList" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(list)
}

/// <binaryDataArray>
fn parse_binary_data_array<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<BinaryDataArray, ExtractError> {
    let mut a = BinaryDataArray {
        array_length: get_attr_usize(start, b"arrayLength"),
        encoded_length: get_attr_usize(start, b"encodedLength"),
        ..Default::default()
    };

    let mut user_params = Vec::new();
    let mut buf = Vec::with_capacity(1024);
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Empty(e) => {
                push_params_empty(&e, &mut a.cv_params, &mut user_params);
            }
            Event::Start(e) => {
                if !push_params_start(reader, &e, &mut a.cv_params, &mut user_params)? {
                    if e.name().as_ref() == b"binary" {
                        a.binary = Some(read_text_content(reader, b"binary")?);
                    } else {
                        skip_element(reader, e.name().as_ref())?;
                    }
                }
            }
            Event::End(e) if e.name().as_ref() == b"binaryDataArray" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(a)
}

/// <chromatogramList>
fn parse_chromatogram_list<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<ChromatogramList, ExtractError> {
    let mut list = ChromatogramList {
        count: get_attr_usize(start, b"count"),
        default_data_processing_ref: get_attr(start, b"defaultDataProcessingRef"),
        ..Default::default()
    };

    let mut buf = Vec::with_capacity(1024);
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) => {
                if e.name().as_ref() == b"chromatogram" {
                    list.chromatograms.push(parse_chromatogram(reader, &e)?);
                } else {
                    skip_element(reader, e.name().as_ref())?;
                }
            }
            Event::Empty(e) if e.name().as_ref() == b"chromatogram" => {
                list.chromatograms.push(Chromatogram {
                    id: get_attr(&e, b"id").unwrap_or_default(),
                    index: get_attr_u32(&e, b"index"),
                    default_array_length: get_attr_usize(&e, b"defaultArrayLength"),
                    ..Default::default()
                });
            }
            Event::End(e) if e.name().as_ref() == b"chromatogramList" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(list)
}

/// <chromatogram>
fn parse_chromatogram<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<Chromatogram, ExtractError> {
    let mut c = Chromatogram {
        id: get_attr(start, b"id").unwrap_or_default(),
        index: get_attr_u32(start, b"index"),
        default_array_length: get_attr_usize(start, b"defaultArrayLength"),
        ..Default::default()
    };

    let mut buf = Vec::with_capacity(1024);
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Empty(e) => {
                push_params_empty(&e, &mut c.cv_params, &mut c.user_params);
            }
            Event::Start(e) => {
                if !push_params_start(reader, &e, &mut c.cv_params, &mut c.user_params)? {
                    match e.name().as_ref() {
                        b"precursor" => c.precursor = Some(parse_precursor(reader, &e)?),
                        b"product" => c.product = Some(parse_product(reader, &e)?),
                        b"binaryDataArrayList" => {
                            c.binary_data_array_list =
                                Some(parse_binary_data_array_list(reader, &e)?)
                        }
                        _ => skip_element(reader, e.name().as_ref())?,
                    }
                }
            }
            Event::End(e) if e.name().as_ref() == b"chromatogram" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(c)
}
