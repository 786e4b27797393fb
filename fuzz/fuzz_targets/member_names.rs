#![no_main]
use asar_pack::archive::{pack_archive, ArchiveMember, HeaderSizes, PackOptions};
use libfuzzer_sys::fuzz_target;

// Arbitrary newline-separated names: packing either fails cleanly or yields a
// header whose prefix decodes and whose files all sit inside the payload region.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let members = text
        .split('\n')
        .enumerate()
        .map(|(i, name)| ArchiveMember::new(name, vec![i as u8; i % 7]));

    let Ok(archive) = pack_archive(members, &PackOptions::default().without_integrity()) else {
        return;
    };

    let sizes = HeaderSizes::parse(archive.header()).expect("header prefix must decode");
    assert_eq!(sizes.header_len(), archive.header().len());
    assert_eq!(archive.header().len() % 4, 0);
});
