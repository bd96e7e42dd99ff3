use catpack::catalog::ContentSource;
use catpack::formats::locale::prune_locales;
use catpack::formats::properties::{decode_latin1, parse_properties_bytes};
use catpack::prelude::*;
use pretty_assertions::assert_eq;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    for (name, data) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn entry_names(path: &Path) -> Vec<String> {
    let archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

fn read_entry(path: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut data = Vec::new();
    archive.by_name(name).unwrap().read_to_end(&mut data).unwrap();
    decode_latin1(&data)
}

fn catalog_value(path: &Path, entry: &str, key: &str) -> Option<String> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut data = Vec::new();
    archive.by_name(entry).unwrap().read_to_end(&mut data).unwrap();
    parse_properties_bytes(&data)
        .unwrap()
        .get(key)
        .map(str::to_string)
}

fn texture(name: &str, image: &Path) -> CatalogItem {
    CatalogItem::new(
        name,
        Category::new("Wood"),
        Content::temporary_file(image),
        50.0,
        50.0,
    )
}

fn textures_catalog(count: usize, prefix: &str) -> String {
    let mut text = format!("name={prefix} library\n");
    for n in 1..=count {
        text.push_str(&format!(
            "name#{n}={prefix}{n}\ncategory#{n}=Cat\nimage#{n}=/{prefix}{n}.png\nwidth#{n}=10\nheight#{n}=20\n"
        ));
    }
    text
}

fn names(library: &Library) -> Vec<String> {
    library.items().map(|(_, item)| item.name.clone()).collect()
}

#[test]
fn test_furniture_round_trip() {
    let dir = tempdir().unwrap();
    let model = dir.path().join("sofa.obj");
    let icon = dir.path().join("sofa.png");
    fs::write(&model, b"v 0 0 0").unwrap();
    fs::write(&icon, b"png").unwrap();

    let mut item = CatalogItem::new(
        "Sof\u{e0} \u{2603}",
        Category::new("Living room"),
        Content::temporary_file(&model),
        200.0,
        80.5,
    )
    .with_icon(Content::temporary_file(&icon))
    .with_depth(90.0)
    .with_creator("Studio\tA");
    item.tags = vec!["seat".to_string(), "couch".to_string()];
    item.price = Some(12.5);
    item.movable = Some(false);
    item.creation_date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1);

    let mut library = Library::new(CatalogFamily::Furniture);
    library.metadata_mut().name = Some("Living".to_string());
    let id = library.add_item(item.clone());
    library
        .set_localized(id, "fr", LocalizedField::Category, "Salon")
        .unwrap();

    let destination = dir.path().join("living.sh3f");
    let recorder = LibraryRecorder::new(RecorderOptions::new());
    recorder.write(&library, &destination).unwrap();

    let mut loaded = Library::new(CatalogFamily::Textures);
    let ids = recorder.load(&mut loaded, &destination).unwrap();
    assert_eq!(loaded.family(), CatalogFamily::Furniture);
    assert_eq!(loaded.metadata().name.as_deref(), Some("Living"));
    assert_eq!(ids.len(), 1);

    let read = loaded.item(ids[0]).unwrap();
    assert_eq!(read.name, item.name);
    assert_eq!(read.category, item.category);
    assert_eq!(read.creator, item.creator);
    assert_eq!(read.width, item.width);
    assert_eq!(read.height, item.height);
    assert_eq!(read.depth, item.depth);
    assert_eq!(read.tags, item.tags);
    assert_eq!(read.price, item.price);
    assert_eq!(read.movable, item.movable);
    assert_eq!(read.creation_date, item.creation_date);
    assert!(matches!(
        read.content.source(),
        Some(ContentSource::ArchiveEntry { entry, .. }) if entry == "sofa.obj"
    ));
    assert_eq!(read.content.read_bytes().unwrap(), b"v 0 0 0");
    assert_eq!(loaded.localized_category(ids[0], "fr"), Some("Salon"));
    assert_eq!(loaded.supported_locales().collect::<Vec<_>>(), vec!["fr"]);

    // Saving the loaded library again copies the bundled resources
    let copy = dir.path().join("copy.sh3f");
    recorder.write(&loaded, &copy).unwrap();
    assert_eq!(read_entry(&copy, "sofa.obj"), "v 0 0 0");
    assert_eq!(read_entry(&copy, "sofa.png"), "png");
}

#[test]
fn test_mandatory_field_ends_item_sequence() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("partial.sh3t");
    let mut catalog = textures_catalog(2, "t");
    catalog.push_str("name#3=c\ncategory#3=Cat\nimage#3=/c.png\nheight#3=20\n");
    catalog.push_str("name#4=d\ncategory#4=Cat\nimage#4=/d.png\nwidth#4=10\nheight#4=20\n");
    write_zip(&archive, &[("DefaultTexturesCatalog.properties", &catalog)]);

    let contents = LibraryRecorder::new(RecorderOptions::new())
        .read(&archive)
        .unwrap();
    assert_eq!(contents.items.len(), 2);
}

#[test]
fn test_unparsable_value_is_invalid_catalog() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("bad.sh3t");
    write_zip(
        &archive,
        &[(
            "DefaultTexturesCatalog.properties",
            "name#1=a\ncategory#1=Cat\nimage#1=/a.png\nwidth#1=wide\nheight#1=20\n",
        )],
    );

    let mut library = Library::new(CatalogFamily::Textures);
    let err = LibraryRecorder::new(RecorderOptions::new())
        .load(&mut library, &archive)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCatalog { .. }));
    assert!(library.is_empty());
}

#[test]
fn test_merge_and_replace() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.sh3t");
    let second = dir.path().join("second.sh3t");
    write_zip(
        &first,
        &[("DefaultTexturesCatalog.properties", &textures_catalog(2, "a"))],
    );
    write_zip(
        &second,
        &[
            ("DefaultTexturesCatalog.properties", &textures_catalog(3, "b")),
            ("DefaultTexturesCatalog_de.properties", "name#1=B eins\n"),
        ],
    );
    let recorder = LibraryRecorder::new(RecorderOptions::new());

    let mut library = Library::new(CatalogFamily::Textures);
    recorder.load(&mut library, &first).unwrap();
    let merged = recorder.merge(&mut library, &second).unwrap();
    assert_eq!(library.len(), 5);
    assert_eq!(names(&library), vec!["a1", "a2", "b1", "b2", "b3"]);
    assert_eq!(library.metadata().name.as_deref(), Some("a library"));
    assert_eq!(library.localized_name(merged[0], "de"), Some("B eins"));

    recorder.load(&mut library, &second).unwrap();
    assert_eq!(library.len(), 3);
    assert_eq!(library.metadata().name.as_deref(), Some("b library"));
}

#[test]
fn test_merge_rejects_other_family() {
    let dir = tempdir().unwrap();
    let textures = dir.path().join("woods.sh3t");
    write_zip(
        &textures,
        &[("DefaultTexturesCatalog.properties", &textures_catalog(1, "a"))],
    );

    let mut library = Library::new(CatalogFamily::Furniture);
    let err = LibraryRecorder::new(RecorderOptions::new())
        .merge(&mut library, &textures)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCatalog { .. }));
    assert!(library.is_empty());
}

#[test]
fn test_overlay_binds_by_position() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("overlay.sh3t");
    write_zip(
        &archive,
        &[
            ("DefaultTexturesCatalog.properties", &textures_catalog(3, "t")),
            (
                "DefaultTexturesCatalog_fr.properties",
                "name#1=un\nname#2=t2\ncategory#3=Chat\nname#7=sept\n",
            ),
            ("DefaultTexturesCatalog_pt_BR.properties", "name#2=dois\n"),
        ],
    );

    let mut library = Library::new(CatalogFamily::Textures);
    let ids = LibraryRecorder::new(RecorderOptions::new())
        .load(&mut library, &archive)
        .unwrap();

    assert_eq!(
        library.supported_locales().collect::<Vec<_>>(),
        vec!["fr", "pt_BR"]
    );
    assert_eq!(library.localized(ids[0], "fr", LocalizedField::Name), Some("un"));
    // Equal to the default value, so not an override
    assert_eq!(library.localized(ids[1], "fr", LocalizedField::Name), None);
    assert_eq!(library.localized_name(ids[1], "fr"), Some("t2"));
    assert_eq!(library.localized_category(ids[2], "fr"), Some("Chat"));
    assert_eq!(library.localized_name(ids[1], "pt_BR"), Some("dois"));
    assert_eq!(library.localized_name(ids[2], "pt_BR"), Some("t3"));
}

#[test]
fn test_entry_name_collisions_and_dedup() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("a")).unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    let first = dir.path().join("a").join("oak.png");
    let second = dir.path().join("b").join("Oak.png");
    fs::write(&first, b"first").unwrap();
    fs::write(&second, b"second").unwrap();

    let mut library = Library::new(CatalogFamily::Textures);
    library.add_item(texture("one", &first));
    library.add_item(texture("two", &second));
    library.add_item(texture("three", &first));

    let destination = dir.path().join("woods.sh3t");
    LibraryRecorder::new(RecorderOptions::new())
        .write(&library, &destination)
        .unwrap();

    assert_eq!(
        entry_names(&destination),
        vec!["DefaultTexturesCatalog.properties", "Oak2.png", "oak.png"]
    );
    let catalog = "DefaultTexturesCatalog.properties";
    assert_eq!(
        catalog_value(&destination, catalog, "image#1").as_deref(),
        Some("/oak.png")
    );
    assert_eq!(
        catalog_value(&destination, catalog, "image#2").as_deref(),
        Some("/Oak2.png")
    );
    assert_eq!(
        catalog_value(&destination, catalog, "image#3").as_deref(),
        Some("/oak.png")
    );
    assert_eq!(read_entry(&destination, "Oak2.png"), "second");
}

#[test]
fn test_external_copy_keeps_existing_files() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("oak.png");
    fs::write(&image, b"new").unwrap();
    let resources = dir.path().join("resources");
    fs::create_dir(&resources).unwrap();
    let existing = resources.join("oak.png");
    fs::write(&existing, b"published").unwrap();
    let modified = fs::metadata(&existing).unwrap().modified().unwrap();

    let mut library = Library::new(CatalogFamily::Textures);
    library.add_item(texture("Oak", &image));

    let destination = dir.path().join("woods.sh3t");
    let options = RecorderOptions::new().external_resources(&resources, "https://example.com/res/");
    LibraryRecorder::new(options)
        .write(&library, &destination)
        .unwrap();

    assert_eq!(fs::read(&existing).unwrap(), b"published");
    assert_eq!(fs::metadata(&existing).unwrap().modified().unwrap(), modified);
    assert_eq!(
        entry_names(&destination),
        vec!["DefaultTexturesCatalog.properties"]
    );
    assert_eq!(
        catalog_value(&destination, "DefaultTexturesCatalog.properties", "image#1").as_deref(),
        Some("https://example.com/res/oak.png")
    );
}

#[test]
fn test_multi_part_model_is_published_as_jar_url() {
    let dir = tempdir().unwrap();
    let chair = dir.path().join("chair");
    fs::create_dir(&chair).unwrap();
    let model = chair.join("my chair.obj");
    fs::write(&model, b"model").unwrap();
    fs::write(chair.join("wood.jpg"), b"texture").unwrap();
    let icon = dir.path().join("chair_icon.png");
    fs::write(&icon, b"icon").unwrap();

    let mut item = CatalogItem::new(
        "Chair",
        Category::new("Seats"),
        Content::temporary_file(&model),
        40.0,
        90.0,
    )
    .with_icon(Content::temporary_file(&icon))
    .with_depth(45.0);
    item.multi_part_model = true;
    let mut library = Library::new(CatalogFamily::Furniture);
    library.add_item(item);

    let resources = dir.path().join("resources");
    let destination = dir.path().join("seats.sh3f");
    let options = RecorderOptions::new().external_resources(&resources, "https://example.com/res/");
    LibraryRecorder::new(options)
        .write(&library, &destination)
        .unwrap();

    let catalog = "DefaultFurnitureCatalog.properties";
    assert_eq!(
        catalog_value(&destination, catalog, "model#1").as_deref(),
        Some("jar:https://example.com/res/chair.zip!/my%20chair.obj")
    );
    assert_eq!(
        catalog_value(&destination, catalog, "icon#1").as_deref(),
        Some("https://example.com/res/chair_icon.png")
    );
    assert_eq!(
        entry_names(&resources.join("chair.zip")),
        vec!["my chair.obj", "wood.jpg"]
    );
    assert_eq!(fs::read(resources.join("chair_icon.png")).unwrap(), b"icon");
}

#[test]
fn test_cancelled_write_is_interrupted() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("oak.png");
    fs::write(&image, b"png").unwrap();
    let mut library = Library::new(CatalogFamily::Textures);
    library.add_item(texture("Oak", &image));

    let token = CancelToken::new();
    token.cancel();
    let destination = dir.path().join("woods.sh3t");
    let err = LibraryRecorder::new(RecorderOptions::new())
        .with_cancel_token(token)
        .write(&library, &destination)
        .unwrap_err();

    assert!(err.is_interrupted());
    assert!(!destination.exists());
}

#[test]
fn test_cancelled_read_leaves_library_unchanged() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("woods.sh3t");
    write_zip(
        &archive,
        &[("DefaultTexturesCatalog.properties", &textures_catalog(2, "t"))],
    );

    let token = CancelToken::new();
    token.cancel();
    let mut library = Library::new(CatalogFamily::Textures);
    let err = LibraryRecorder::new(RecorderOptions::new())
        .with_cancel_token(token)
        .load(&mut library, &archive)
        .unwrap_err();

    assert!(matches!(err, Error::Interrupted));
    assert!(library.is_empty());
}

#[test]
fn test_failed_write_leaves_destination_untouched() {
    let dir = tempdir().unwrap();
    let destination = dir.path().join("woods.sh3t");
    fs::write(&destination, b"previous").unwrap();

    let mut library = Library::new(CatalogFamily::Textures);
    library.add_item(texture("Ghost", &dir.path().join("missing.png")));

    let err = LibraryRecorder::new(RecorderOptions::new())
        .write(&library, &destination)
        .unwrap_err();
    assert!(matches!(err, Error::WriteFailed { .. }));
    assert_eq!(fs::read(&destination).unwrap(), b"previous");

    let leftovers = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn test_inconsistent_external_settings_are_rejected() {
    let dir = tempdir().unwrap();
    let library = Library::new(CatalogFamily::Textures);
    let mut options = RecorderOptions::new();
    options.resources_local_directory = Some(dir.path().join("resources"));

    let err = LibraryRecorder::new(options)
        .write(&library, dir.path().join("woods.sh3t"))
        .unwrap_err();
    let Error::WriteFailed { source, .. } = err else {
        panic!("expected a write failure");
    };
    assert!(matches!(*source, Error::InvalidConfig(_)));
}

#[test]
fn test_locale_table_pruning() {
    let tags = ["be", "be_BY", "en", "en_GB", "en_US", "pt", "pt_BR"];
    assert_eq!(
        prune_locales(&tags),
        vec!["be", "en", "en_GB", "en_US", "pt"]
    );

    let available = available_locales();
    assert!(available.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(available.iter().any(|locale| locale == "en"));
}

#[test]
fn test_textures_round_trip_with_locales() {
    let dir = tempdir().unwrap();
    let mut library = Library::new(CatalogFamily::Textures);
    let mut ids = Vec::new();
    for name in ["oak", "pine", "walnut", "birch"] {
        let image = dir.path().join(format!("{name}.jpg"));
        fs::write(&image, name.as_bytes()).unwrap();
        ids.push(library.add_item(texture(name, &image)));
    }
    library
        .set_localized(ids[0], "fr", LocalizedField::Name, "ch\u{ea}ne")
        .unwrap();
    library
        .set_localized(ids[2], "fr", LocalizedField::Category, "Bois")
        .unwrap();
    library
        .set_localized(ids[3], "pt_BR", LocalizedField::Name, "b\u{e9}tula")
        .unwrap();
    library
        .set_localized(ids[3], "fr", LocalizedField::Name, "bouleau")
        .unwrap();

    let destination = dir.path().join("woods.sh3t");
    let recorder = LibraryRecorder::new(RecorderOptions::new());
    recorder.write(&library, &destination).unwrap();
    assert!(entry_names(&destination).contains(&"DefaultTexturesCatalog_pt_BR.properties".to_string()));

    let mut loaded = Library::new(CatalogFamily::Textures);
    let loaded_ids = recorder.load(&mut loaded, &destination).unwrap();
    assert_eq!(names(&loaded), vec!["oak", "pine", "walnut", "birch"]);
    assert_eq!(
        loaded.supported_locales().collect::<Vec<_>>(),
        vec!["fr", "pt_BR"]
    );
    assert_eq!(loaded.localized_name(loaded_ids[0], "fr"), Some("ch\u{ea}ne"));
    assert_eq!(loaded.localized(loaded_ids[1], "fr", LocalizedField::Name), None);
    assert_eq!(loaded.localized_category(loaded_ids[2], "fr"), Some("Bois"));
    assert_eq!(loaded.localized_name(loaded_ids[3], "fr"), Some("bouleau"));
    assert_eq!(loaded.localized_name(loaded_ids[3], "pt_BR"), Some("b\u{e9}tula"));
    assert_eq!(loaded.localized_name(loaded_ids[0], "pt_BR"), Some("oak"));
    for (id, name) in loaded_ids.iter().zip(["oak", "pine", "walnut", "birch"]) {
        let item = loaded.item(*id).unwrap();
        assert_eq!(item.content.read_bytes().unwrap(), name.as_bytes());
    }
}

#[test]
fn test_saving_in_place_twice_keeps_resources() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("a.png");
    let second = dir.path().join("b.png");
    fs::write(&first, b"AAA").unwrap();
    fs::write(&second, b"BBB").unwrap();

    let mut library = Library::new(CatalogFamily::Textures);
    library.add_item(texture("b", &first));
    library.add_item(texture("a", &second));

    let destination = dir.path().join("woods.sh3t");
    let recorder =
        LibraryRecorder::new(RecorderOptions::new().match_content_name_to_item_name(true));
    recorder.write(&library, &destination).unwrap();
    assert_eq!(read_entry(&destination, "b.png"), "AAA");

    let mut loaded = Library::new(CatalogFamily::Textures);
    let ids = recorder.load(&mut loaded, &destination).unwrap();
    // Swapping the names swaps the entry names the resources are saved under
    loaded.item_mut(ids[0]).unwrap().name = "a".to_string();
    loaded.item_mut(ids[1]).unwrap().name = "b".to_string();
    recorder.write(&loaded, &destination).unwrap();
    recorder.write(&loaded, &destination).unwrap();

    assert_eq!(read_entry(&destination, "a.png"), "AAA");
    assert_eq!(read_entry(&destination, "b.png"), "BBB");
    let mut reloaded = Library::new(CatalogFamily::Textures);
    let ids = recorder.load(&mut reloaded, &destination).unwrap();
    let bytes = |id| reloaded.item(id).unwrap().content.read_bytes().unwrap();
    assert_eq!(bytes(ids[0]), b"AAA");
    assert_eq!(bytes(ids[1]), b"BBB");
}

#[test]
fn test_furniture_without_icon_is_not_written() {
    let dir = tempdir().unwrap();
    let destination = dir.path().join("seats.sh3f");
    fs::write(&destination, b"previous").unwrap();
    let model = dir.path().join("chair.obj");
    let icon = dir.path().join("chair.png");
    fs::write(&model, b"model").unwrap();
    fs::write(&icon, b"icon").unwrap();

    let chair = |name: &str| {
        CatalogItem::new(
            name,
            Category::new("Seats"),
            Content::temporary_file(&model),
            40.0,
            90.0,
        )
        .with_depth(45.0)
    };
    let mut library = Library::new(CatalogFamily::Furniture);
    library.add_item(chair("first").with_icon(Content::temporary_file(&icon)));
    library.add_item(chair("second"));
    library.add_item(chair("third").with_icon(Content::temporary_file(&icon)));

    let err = LibraryRecorder::new(RecorderOptions::new())
        .write(&library, &destination)
        .unwrap_err();
    let Error::WriteFailed { source, .. } = err else {
        panic!("expected a write failure");
    };
    assert!(matches!(*source, Error::InvalidCatalog { .. }));
    assert_eq!(fs::read(&destination).unwrap(), b"previous");
}

#[test]
fn test_jar_url_outside_zip_keeps_its_url() {
    let dir = tempdir().unwrap();
    let url = "jar:https://example.com/res/sofa.jar!/sofa.png";
    let mut library = Library::new(CatalogFamily::Textures);
    library.add_item(CatalogItem::new(
        "Sofa",
        Category::new("Fabric"),
        Content::from_url(url),
        50.0,
        50.0,
    ));

    let destination = dir.path().join("fabrics.sh3t");
    LibraryRecorder::new(RecorderOptions::new().offline(true))
        .write(&library, &destination)
        .unwrap();

    assert_eq!(
        catalog_value(&destination, "DefaultTexturesCatalog.properties", "image#1").as_deref(),
        Some(url)
    );
    assert_eq!(
        entry_names(&destination),
        vec!["DefaultTexturesCatalog.properties"]
    );
}

#[cfg(feature = "remote")]
fn serve_once(body: Vec<u8>) -> String {
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 4096];
        let _ = stream.read(&mut request);
        let header = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(header.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
    });
    format!("http://{address}")
}

#[cfg(feature = "remote")]
#[test]
fn test_offline_write_embeds_downloaded_image() {
    let dir = tempdir().unwrap();
    let base = serve_once(b"remote oak".to_vec());
    let mut library = Library::new(CatalogFamily::Textures);
    library.add_item(CatalogItem::new(
        "Oak",
        Category::new("Wood"),
        Content::from_url(format!("{base}/res/oak.png")),
        50.0,
        50.0,
    ));

    let destination = dir.path().join("woods.sh3t");
    LibraryRecorder::new(RecorderOptions::new().offline(true))
        .write(&library, &destination)
        .unwrap();

    assert_eq!(
        catalog_value(&destination, "DefaultTexturesCatalog.properties", "image#1").as_deref(),
        Some("/oak.png")
    );
    assert_eq!(read_entry(&destination, "oak.png"), "remote oak");
}

#[cfg(feature = "remote")]
#[test]
fn test_offline_write_embeds_downloaded_multi_part_model() {
    let dir = tempdir().unwrap();
    let container = dir.path().join("chair.zip");
    write_zip(&container, &[("chair.obj", "model"), ("wood.jpg", "texture")]);
    let base = serve_once(fs::read(&container).unwrap());
    let icon = dir.path().join("chair.png");
    fs::write(&icon, b"icon").unwrap();

    let mut item = CatalogItem::new(
        "Chair",
        Category::new("Seats"),
        Content::from_url(format!("jar:{base}/res/chair.zip!/chair.obj")),
        40.0,
        90.0,
    )
    .with_icon(Content::temporary_file(&icon))
    .with_depth(45.0);
    item.multi_part_model = true;
    let mut library = Library::new(CatalogFamily::Furniture);
    library.add_item(item);

    let destination = dir.path().join("seats.sh3f");
    LibraryRecorder::new(RecorderOptions::new().offline(true))
        .write(&library, &destination)
        .unwrap();

    assert_eq!(
        catalog_value(&destination, "DefaultFurnitureCatalog.properties", "model#1").as_deref(),
        Some("/chair/chair.obj")
    );
    assert_eq!(read_entry(&destination, "chair/wood.jpg"), "texture");
}
